use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Maximum distance from 1.0 tolerated by `validate` for a row sum.
pub const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Transition probabilities of a finite-state Markov chain.
///
/// Maps a source state to its outgoing row `{ destination => probability }`.
/// Rows and destinations are kept in lexicographic order, which is the
/// order the walker scans them in.
///
/// The table is not validated on construction: a row summing to less than
/// 1.0 is accepted and makes the walker stay in place when the draw falls
/// past the last destination. Call `validate` to report such rows.
///
/// Serializes as a plain nested map:
/// `{ "Sunny": { "Rainy": 0.2, "Sunny": 0.8 } }`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct TransitionTable {
	rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TransitionTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of `insert`.
	pub fn with_transition(mut self, from: &str, to: &str, probability: f64) -> Self {
		self.insert(from, to, probability);
		self
	}

	/// Sets the probability of moving from `from` to `to`.
	///
	/// Replaces any previous value for the same pair.
	pub fn insert(&mut self, from: &str, to: &str, probability: f64) {
		self.rows
			.entry(from.to_owned())
			.or_default()
			.insert(to.to_owned(), probability);
	}

	/// Outgoing row of `state`, or `None` if the state has no row.
	pub fn row(&self, state: &str) -> Option<&BTreeMap<String, f64>> {
		self.rows.get(state)
	}

	/// Returns the stored key and row of `state`.
	pub(crate) fn entry(&self, state: &str) -> Option<(&str, &BTreeMap<String, f64>)> {
		self.rows.get_key_value(state).map(|(key, row)| (key.as_str(), row))
	}

	/// Whether `state` has an outgoing row.
	pub fn contains(&self, state: &str) -> bool {
		self.rows.contains_key(state)
	}

	/// Source states, in lexicographic order.
	pub fn states(&self) -> impl Iterator<Item = &str> {
		self.rows.keys().map(String::as_str)
	}

	/// Checks every row for invalid probabilities and bad sums.
	///
	/// The walker never requires this; it is an optional diagnostic.
	///
	/// # Errors
	/// - `InvalidProbability` for the first entry outside `[0, 1]` or not finite
	/// - `MalformedRow` for the first row whose sum is not 1.0
	///   (within `ROW_SUM_TOLERANCE`)
	pub fn validate(&self) -> Result<()> {
		for (from, row) in &self.rows {
			for (to, &probability) in row {
				if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
					return Err(SimError::InvalidProbability {
						from: from.clone(),
						to: to.clone(),
						probability,
					});
				}
			}

			let sum: f64 = row.values().sum();
			if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
				return Err(SimError::MalformedRow { state: from.clone(), sum });
			}
		}
		Ok(())
	}
}
