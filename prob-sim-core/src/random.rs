use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SimError};

/// Source of uniform draws in `[0.0, 1.0)`.
///
/// Stochastic components take this capability instead of owning a
/// generator, so a fixed sequence can be substituted in tests.
pub trait UniformSource {
	/// Returns the next draw in `[0.0, 1.0)`.
	fn next_uniform(&mut self) -> f64;
}

impl<F: FnMut() -> f64> UniformSource for F {
	fn next_uniform(&mut self) -> f64 {
		self()
	}
}

/// Adapter exposing any `rand` generator as a `UniformSource`.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
	rng: R,
}

impl<R: Rng> RngSource<R> {
	/// Wraps an existing generator.
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RngSource<StdRng> {
	/// Generator seeded from the operating system entropy source.
	pub fn from_entropy() -> Self {
		Self::new(StdRng::from_os_rng())
	}

	/// Reproducible generator.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> UniformSource for RngSource<R> {
	fn next_uniform(&mut self) -> f64 {
		self.rng.random::<f64>()
	}
}

/// Replays a fixed list of draws, starting over once exhausted.
///
/// # Invariants
/// - `values` is never empty
/// - Every value is in `[0.0, 1.0)`
#[derive(Debug, Clone)]
pub struct SequenceSource {
	values: Vec<f64>,
	position: usize,
}

impl SequenceSource {
	/// Creates a replaying source.
	///
	/// # Errors
	/// - `EmptySequence` if `values` is empty
	/// - `InvalidUniform` for the first value outside `[0.0, 1.0)`
	pub fn new(values: Vec<f64>) -> Result<Self> {
		if values.is_empty() {
			return Err(SimError::EmptySequence);
		}
		if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
			return Err(SimError::InvalidUniform(*bad));
		}
		Ok(Self { values, position: 0 })
	}

	/// Number of draws handed out so far.
	pub fn consumed(&self) -> usize {
		self.position
	}
}

impl UniformSource for SequenceSource {
	fn next_uniform(&mut self) -> f64 {
		let value = self.values[self.position % self.values.len()];
		self.position += 1;
		value
	}
}
