use crate::error::Result;
use crate::sampling::check_normal;

/// Parameters of a demonstration run.
///
/// # Responsibilities
/// - Track how many trials each Monte Carlo demo performs
/// - Track the Markov walk length and start state
/// - Keep the normal-distribution parameters valid
///
/// # Invariants
/// - `mean` is finite
/// - `std_dev` is finite and `>= 0`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInput {
	/// Number of coin tosses.
	pub coin_trials: usize,

	/// Number of die rolls.
	pub dice_trials: usize,

	/// Number of values drawn from the normal distribution.
	pub normal_samples: usize,

	/// How many normal values are printed.
	pub normal_preview: usize,

	/// Number of states reported by the Markov walk.
	pub markov_steps: usize,

	/// Start state of the Markov walk.
	pub markov_start: String,

	mean: f64,

	std_dev: f64,
}

impl Default for SimulationInput {
	fn default() -> Self {
		Self {
			coin_trials: 1000,
			dice_trials: 1000,
			normal_samples: 1000,
			normal_preview: 10,
			markov_steps: 10,
			markov_start: "Sunny".to_owned(),
			mean: 0.0,
			std_dev: 1.0,
		}
	}
}

impl SimulationInput {
	pub fn mean(&self) -> f64 {
		self.mean
	}

	pub fn std_dev(&self) -> f64 {
		self.std_dev
	}

	/// Sets the normal-distribution parameters.
	///
	/// # Errors
	/// Returns `InvalidDistribution` if `mean` is not finite or `std_dev` is
	/// negative or not finite. The previous values are kept on error.
	pub fn set_normal(&mut self, mean: f64, std_dev: f64) -> Result<()> {
		check_normal(mean, std_dev)?;
		self.mean = mean;
		self.std_dev = std_dev;
		Ok(())
	}
}
