use thiserror::Error;

/// Errors reported by the classifier, the Markov walker and the samplers.
///
/// Every failure is local to the call that raised it; nothing is retried
/// or recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
	/// `predict` was called before any training example was ingested.
	#[error("Model is untrained: no training examples were ingested")]
	UntrainedModel,

	/// Classifier counts that could not have come from training.
	#[error("Inconsistent model counts: {0}")]
	InconsistentModel(String),

	/// A state has no outgoing row in the transition table.
	#[error("State '{state}' not found in transition table")]
	UnknownState { state: String },

	/// A row does not sum to 1 (validation pass only).
	#[error("Row '{state}' is malformed: probabilities sum to {sum} (expected 1.0)")]
	MalformedRow { state: String, sum: f64 },

	/// A transition probability is outside [0, 1] or not finite.
	#[error("Transition '{from}' -> '{to}' has invalid probability {probability}")]
	InvalidProbability { from: String, to: String, probability: f64 },

	/// A Monte Carlo run was asked for zero trials.
	#[error("At least one trial is required")]
	NoTrials,

	/// Distribution parameters rejected by the sampler.
	#[error("Invalid distribution: {0}")]
	InvalidDistribution(String),

	/// An injected draw is outside [0, 1).
	#[error("Uniform draw must be in [0.0, 1.0), got {0}")]
	InvalidUniform(f64),

	/// An injected draw sequence has no values.
	#[error("Draw sequence cannot be empty")]
	EmptySequence,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SimError>;
