use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Single-word Naive Bayes classifier with Laplace smoothing.
///
/// The model is a set of frequency tables built from `(label, word)`
/// observations. A query scores every known label with
/// `prior * likelihood` where:
/// - `prior = class_count[label] / total_docs`
/// - `likelihood = (word_count[label][word] + 1) / (class_count[label] + 1)`
///
/// Only one token is scored per query; documents are not tokenized and
/// the likelihoods of several words are never combined.
///
/// # Invariants
/// - `total_docs == sum(class_count.values())`
/// - Counts only ever grow: training and merging are append-only
///
/// # Ordering
/// Labels are kept in lexicographic order. `predict` keeps the first label
/// reaching a strictly greater posterior, so on a tie the lexicographically
/// smallest label wins.
///
/// # Deserialization
/// Counts read from data are checked against the invariants above and
/// rejected with `InconsistentModel` if they could not come from training.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(try_from = "RawCounts")]
pub struct NaiveBayes {
	/// Number of training examples per label.
	class_count: BTreeMap<String, usize>,
	/// Co-occurrence counts, indexed by label then word.
	/// Example: { "spam" => { "buy" => 1, "cheap" => 1 } }
	word_count: BTreeMap<String, BTreeMap<String, usize>>,
	/// Number of training examples ever ingested.
	total_docs: usize,
}

/// Unchecked field layout of `NaiveBayes`, as read from data.
#[derive(Deserialize)]
struct RawCounts {
	class_count: BTreeMap<String, usize>,
	word_count: BTreeMap<String, BTreeMap<String, usize>>,
	total_docs: usize,
}

impl TryFrom<RawCounts> for NaiveBayes {
	type Error = SimError;

	fn try_from(raw: RawCounts) -> Result<Self> {
		let class_sum: usize = raw.class_count.values().sum();
		if class_sum != raw.total_docs {
			return Err(SimError::InconsistentModel(format!(
				"total_docs is {} but class counts sum to {}",
				raw.total_docs, class_sum
			)));
		}

		if let Some(label) = raw.word_count.keys().find(|label| !raw.class_count.contains_key(*label)) {
			return Err(SimError::InconsistentModel(format!("word counts for unknown label '{}'", label)));
		}

		for (label, &count) in &raw.class_count {
			if count == 0 {
				return Err(SimError::InconsistentModel(format!("label '{}' has no examples", label)));
			}
			let words: usize = raw.word_count.get(label).map_or(0, |words| words.values().sum());
			if words != count {
				return Err(SimError::InconsistentModel(format!(
					"label '{}' has {} examples but {} word occurrences",
					label, count, words
				)));
			}
		}

		Ok(Self {
			class_count: raw.class_count,
			word_count: raw.word_count,
			total_docs: raw.total_docs,
		})
	}
}

impl NaiveBayes {
	/// Creates an empty, untrained model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Ingests a batch of `(label, word)` examples.
	///
	/// Repeated calls accumulate; an empty batch is a no-op.
	///
	/// # Notes
	/// Takes `&mut self`: callers sharing a model across threads must wrap it
	/// in their own lock, each increment is an unguarded read-modify-write.
	pub fn train<L: AsRef<str>, W: AsRef<str>>(&mut self, examples: &[(L, W)]) {
		for (label, word) in examples {
			self.add_example(label.as_ref(), word.as_ref());
		}
		debug!(
			"Trained on {} examples ({} total, {} labels)",
			examples.len(),
			self.total_docs,
			self.class_count.len()
		);
	}

	/// Records one observation of `word` under `label`.
	pub fn add_example(&mut self, label: &str, word: &str) {
		*self.class_count.entry(label.to_owned()).or_insert(0) += 1;
		*self
			.word_count
			.entry(label.to_owned())
			.or_default()
			.entry(word.to_owned())
			.or_insert(0) += 1;
		self.total_docs += 1;
	}

	/// Returns the most probable label for a single word.
	///
	/// # Errors
	/// Returns `UntrainedModel` if no example was ever ingested.
	pub fn predict(&self, word: &str) -> Result<&str> {
		let mut best: Option<(&str, f64)> = None;
		for (label, posterior) in self.scores(word)? {
			// Strict comparison: the earlier label keeps a tie
			if best.is_none_or(|(_, max)| posterior > max) {
				best = Some((label, posterior));
			}
		}
		best.map(|(label, _)| label).ok_or(SimError::UntrainedModel)
	}

	/// Posterior score of every known label for `word`, in label order.
	///
	/// Scores are unnormalized (`prior * likelihood`).
	///
	/// # Errors
	/// Returns `UntrainedModel` if no example was ever ingested.
	pub fn scores(&self, word: &str) -> Result<Vec<(&str, f64)>> {
		if self.total_docs == 0 {
			return Err(SimError::UntrainedModel);
		}

		let total = self.total_docs as f64;
		Ok(self
			.class_count
			.iter()
			.map(|(label, &count)| {
				let prior = count as f64 / total;
				let likelihood = self.smoothed_likelihood(label, count, word);
				(label.as_str(), prior * likelihood)
			})
			.collect())
	}

	/// Laplace-smoothed likelihood of `word` given `label`.
	///
	/// Never zero for a known label: an unseen word scores
	/// `1 / (class_count + 1)`. Returns `None` for an unknown label.
	pub fn likelihood(&self, label: &str, word: &str) -> Option<f64> {
		let count = *self.class_count.get(label)?;
		Some(self.smoothed_likelihood(label, count, word))
	}

	fn smoothed_likelihood(&self, label: &str, class_count: usize, word: &str) -> f64 {
		(self.word_count(label, word) + 1) as f64 / (class_count + 1) as f64
	}

	/// Number of examples ever ingested.
	pub fn total_docs(&self) -> usize {
		self.total_docs
	}

	/// Number of examples seen with `label` (0 if unknown).
	pub fn class_count(&self, label: &str) -> usize {
		self.class_count.get(label).copied().unwrap_or(0)
	}

	/// Number of times `word` was seen with `label` (0 if unseen).
	pub fn word_count(&self, label: &str, word: &str) -> usize {
		self.word_count
			.get(label)
			.and_then(|words| words.get(word))
			.copied()
			.unwrap_or(0)
	}

	/// Known labels, in lexicographic order.
	pub fn labels(&self) -> impl Iterator<Item = &str> {
		self.class_count.keys().map(String::as_str)
	}

	/// Merges another model into this one.
	///
	/// All counts are summed, which is equivalent to having trained this
	/// model on both example sets.
	pub fn merge(&mut self, other: &Self) {
		for (label, count) in &other.class_count {
			*self.class_count.entry(label.clone()).or_insert(0) += count;
		}
		for (label, words) in &other.word_count {
			let entry = self.word_count.entry(label.clone()).or_default();
			for (word, count) in words {
				*entry.entry(word.clone()).or_insert(0) += count;
			}
		}
		self.total_docs += other.total_docs;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn spam_ham() -> NaiveBayes {
		let mut model = NaiveBayes::new();
		model.train(&[
			("spam", "buy"),
			("spam", "cheap"),
			("ham", "hello"),
			("ham", "friend"),
			("spam", "offer"),
		]);
		model
	}

	#[test]
	fn predicts_worked_example() {
		let model = spam_ham();
		assert_eq!(model.predict("buy").unwrap(), "spam");
		assert_eq!(model.predict("hello").unwrap(), "ham");
	}

	#[test]
	fn scores_match_hand_computation() {
		let model = spam_ham();
		let scores = model.scores("buy").unwrap();
		assert_eq!(scores.len(), 2);

		// ham: 2/5 * 1/3, spam: 3/5 * 2/4
		assert_eq!(scores[0].0, "ham");
		assert!((scores[0].1 - 2.0 / 15.0).abs() < 1e-12);
		assert_eq!(scores[1].0, "spam");
		assert!((scores[1].1 - 0.3).abs() < 1e-12);
	}

	#[test]
	fn untrained_model_reports_error() {
		let model = NaiveBayes::new();
		assert_eq!(model.predict("buy"), Err(SimError::UntrainedModel));
		assert_eq!(model.scores("buy"), Err(SimError::UntrainedModel));
	}

	#[test]
	fn empty_batch_is_noop() {
		let mut model = NaiveBayes::new();
		model.train::<&str, &str>(&[]);
		assert_eq!(model, NaiveBayes::new());
		assert_eq!(model.predict("x"), Err(SimError::UntrainedModel));
	}

	#[test]
	fn tie_goes_to_smallest_label() {
		let mut model = NaiveBayes::new();
		model.train(&[("zeta", "a"), ("alpha", "b")]);
		// Both labels score 1/2 * 1/2 for an unseen word
		assert_eq!(model.predict("unseen").unwrap(), "alpha");
	}

	#[test]
	fn repeated_training_accumulates() {
		let mut model = spam_ham();
		model.train(&[("ham", "buy"), ("ham", "buy")]);
		assert_eq!(model.total_docs(), 7);
		assert_eq!(model.class_count("ham"), 4);
		assert_eq!(model.word_count("ham", "buy"), 2);
		// ham: 4/7 * 3/5 > spam: 3/7 * 2/4
		assert_eq!(model.predict("buy").unwrap(), "ham");
	}

	#[test]
	fn likelihood_unknown_label_is_none() {
		let model = spam_ham();
		assert_eq!(model.likelihood("eggs", "buy"), None);
		assert_eq!(model.likelihood("spam", "buy"), Some(0.5));
	}

	#[test]
	fn merge_matches_training_on_both_sets() {
		let first = [("spam", "buy"), ("ham", "hello")];
		let second = [("spam", "cheap"), ("spam", "buy"), ("ham", "friend")];

		let mut merged = NaiveBayes::new();
		merged.train(&first);
		let mut other = NaiveBayes::new();
		other.train(&second);
		merged.merge(&other);

		let mut direct = NaiveBayes::new();
		direct.train(&first);
		direct.train(&second);

		assert_eq!(merged, direct);
		assert_eq!(merged.labels().collect::<Vec<_>>(), vec!["ham", "spam"]);
	}

	#[test]
	fn trained_model_survives_serde() {
		let model = spam_ham();
		let json = serde_json::to_string(&model).unwrap();
		let back: NaiveBayes = serde_json::from_str(&json).unwrap();
		assert_eq!(back, model);
		assert_eq!(back.predict("buy").unwrap(), "spam");
	}

	#[test]
	fn total_docs_must_match_class_counts() {
		let json = r#"{"class_count":{"spam":3,"ham":1},"word_count":{},"total_docs":1}"#;
		let err = serde_json::from_str::<NaiveBayes>(json).unwrap_err();
		assert!(err.to_string().contains("total_docs is 1 but class counts sum to 4"));
	}

	#[test]
	fn word_counts_must_match_class_counts() {
		let json = r#"{"class_count":{"spam":2},"word_count":{"spam":{"buy":1}},"total_docs":2}"#;
		assert!(serde_json::from_str::<NaiveBayes>(json).is_err());

		let json = r#"{"class_count":{"spam":1},"word_count":{"spam":{"buy":1},"ham":{"hi":1}},"total_docs":1}"#;
		let err = serde_json::from_str::<NaiveBayes>(json).unwrap_err();
		assert!(err.to_string().contains("unknown label 'ham'"));

		let json = r#"{"class_count":{"spam":0},"word_count":{},"total_docs":0}"#;
		let err = serde_json::from_str::<NaiveBayes>(json).unwrap_err();
		assert!(err.to_string().contains("label 'spam' has no examples"));
	}

	fn examples() -> impl Strategy<Value = Vec<(String, String)>> {
		prop::collection::vec(("[a-c]", "[a-e]{1,3}"), 0..40)
	}

	proptest! {
		#[test]
		fn totals_track_every_example(batches in prop::collection::vec(examples(), 0..5)) {
			let mut model = NaiveBayes::new();
			for batch in &batches {
				model.train(batch);
			}

			let all: Vec<&(String, String)> = batches.iter().flatten().collect();
			prop_assert_eq!(model.total_docs(), all.len());

			let mut sum = 0;
			for label in model.labels() {
				let expected = all.iter().filter(|(l, _)| l == label).count();
				prop_assert_eq!(model.class_count(label), expected);
				sum += model.class_count(label);
			}
			prop_assert_eq!(sum, model.total_docs());
		}

		#[test]
		fn unseen_word_likelihood_is_floor(batch in examples(), word in "[x-z]{1,3}") {
			let mut model = NaiveBayes::new();
			model.train(&batch);
			let labels: Vec<String> = model.labels().map(str::to_owned).collect();
			for label in labels {
				let floor = 1.0 / (model.class_count(&label) + 1) as f64;
				let likelihood = model.likelihood(&label, &word).unwrap();
				prop_assert!(likelihood > 0.0);
				prop_assert!((likelihood - floor).abs() < 1e-12);
			}
		}
	}
}
