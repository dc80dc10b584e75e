use std::fmt;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, SimError};

/// Number of faces of the simulated die.
pub const DIE_FACES: usize = 6;

/// Outcome of a series of fair coin tosses.
///
/// Only built by `coin_toss`, so `0 < trials` and `heads <= trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinTossSummary {
	trials: usize,
	heads: usize,
}

impl CoinTossSummary {
	pub fn trials(&self) -> usize {
		self.trials
	}

	pub fn heads(&self) -> usize {
		self.heads
	}

	pub fn tails(&self) -> usize {
		self.trials - self.heads
	}

	/// Fraction of tosses that landed heads.
	pub fn heads_ratio(&self) -> f64 {
		self.heads as f64 / self.trials as f64
	}
}

impl fmt::Display for CoinTossSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Heads: {} ({}%)", self.heads, self.heads_ratio() * 100.0)?;
		write!(f, "Tails: {} ({}%)", self.tails(), (1.0 - self.heads_ratio()) * 100.0)
	}
}

/// Tosses a fair coin `trials` times and counts heads.
///
/// # Errors
/// Returns `NoTrials` if `trials == 0`.
pub fn coin_toss<R: Rng + ?Sized>(rng: &mut R, trials: usize) -> Result<CoinTossSummary> {
	if trials == 0 {
		return Err(SimError::NoTrials);
	}
	let heads = (0..trials).filter(|_| rng.random_range(0..=1) == 1).count();
	debug!("Coin toss: {} heads out of {}", heads, trials);
	Ok(CoinTossSummary { trials, heads })
}

/// Face frequencies of a series of fair die rolls.
///
/// Only built by `dice_roll`, so `0 < trials` and the counts sum to `trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRollSummary {
	trials: usize,
	/// `counts[i]` is the number of rolls showing face `i + 1`.
	counts: [usize; DIE_FACES],
}

impl DiceRollSummary {
	pub fn trials(&self) -> usize {
		self.trials
	}

	/// Times `face` (1..=6) came up; 0 for any other face.
	pub fn count(&self, face: usize) -> usize {
		match face {
			1..=DIE_FACES => self.counts[face - 1],
			_ => 0,
		}
	}

	/// Fraction of rolls showing `face`.
	pub fn ratio(&self, face: usize) -> f64 {
		self.count(face) as f64 / self.trials as f64
	}
}

impl fmt::Display for DiceRollSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for face in 1..=DIE_FACES {
			if face > 1 {
				writeln!(f)?;
			}
			write!(f, "Face {}: {} times ({}%)", face, self.count(face), self.ratio(face) * 100.0)?;
		}
		Ok(())
	}
}

/// Rolls a fair six-sided die `trials` times and counts each face.
///
/// # Errors
/// Returns `NoTrials` if `trials == 0`.
pub fn dice_roll<R: Rng + ?Sized>(rng: &mut R, trials: usize) -> Result<DiceRollSummary> {
	if trials == 0 {
		return Err(SimError::NoTrials);
	}
	let mut counts = [0; DIE_FACES];
	for _ in 0..trials {
		let face: usize = rng.random_range(1..=DIE_FACES);
		counts[face - 1] += 1;
	}
	debug!("Dice roll: {:?} over {} rolls", counts, trials);
	Ok(DiceRollSummary { trials, counts })
}

/// Values drawn from a normal distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSample {
	values: Vec<f64>,
}

impl NormalSample {
	pub fn values(&self) -> &[f64] {
		&self.values
	}

	/// First `n` values (fewer if the sample is smaller).
	pub fn preview(&self, n: usize) -> &[f64] {
		&self.values[..n.min(self.values.len())]
	}

	/// Sample mean, `None` for an empty sample.
	pub fn mean(&self) -> Option<f64> {
		if self.values.is_empty() {
			return None;
		}
		Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
	}

	/// Population standard deviation, `None` for an empty sample.
	pub fn std_dev(&self) -> Option<f64> {
		let mean = self.mean()?;
		let variance = self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / self.values.len() as f64;
		Some(variance.sqrt())
	}
}

/// Draws `count` values from N(`mean`, `std_dev`).
///
/// `count == 0` gives an empty sample.
///
/// # Errors
/// Returns `InvalidDistribution` if `mean` is not finite or `std_dev` is
/// negative or not finite.
pub fn sample_normal<R: Rng + ?Sized>(rng: &mut R, count: usize, mean: f64, std_dev: f64) -> Result<NormalSample> {
	check_normal(mean, std_dev)?;
	let normal = Normal::new(mean, std_dev).map_err(|e| SimError::InvalidDistribution(e.to_string()))?;
	let values = (0..count).map(|_| normal.sample(rng)).collect();
	Ok(NormalSample { values })
}

/// Rejects parameters `Normal` cannot sample from.
pub(crate) fn check_normal(mean: f64, std_dev: f64) -> Result<()> {
	if !mean.is_finite() {
		return Err(SimError::InvalidDistribution(format!("mean must be finite, got {}", mean)));
	}
	if !std_dev.is_finite() || std_dev < 0.0 {
		return Err(SimError::InvalidDistribution(format!(
			"standard deviation must be finite and >= 0, got {}",
			std_dev
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn coin_toss_counts_add_up() {
		let mut rng = StdRng::seed_from_u64(1);
		let summary = coin_toss(&mut rng, 1000).unwrap();
		assert_eq!(summary.trials(), 1000);
		assert_eq!(summary.heads() + summary.tails(), 1000);
		// Far outside this band is a broken sampler, not bad luck
		assert!((0.4..0.6).contains(&summary.heads_ratio()));
	}

	#[test]
	fn coin_toss_display() {
		let summary = CoinTossSummary { trials: 4, heads: 1 };
		assert_eq!(summary.to_string(), "Heads: 1 (25%)\nTails: 3 (75%)");
	}

	#[test]
	fn tiny_runs_keep_counts_consistent() {
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..50 {
			let summary = coin_toss(&mut rng, 1).unwrap();
			assert!(summary.heads() <= summary.trials());
			assert_eq!(summary.heads() + summary.tails(), 1);
			assert!(!summary.to_string().contains("NaN"));

			let dice = dice_roll(&mut rng, 1).unwrap();
			assert_eq!(dice.trials(), 1);
			assert!(!dice.to_string().contains("NaN"));
		}
	}

	#[test]
	fn zero_trials_is_an_error() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(coin_toss(&mut rng, 0), Err(SimError::NoTrials));
		assert_eq!(dice_roll(&mut rng, 0), Err(SimError::NoTrials));
	}

	#[test]
	fn dice_roll_covers_every_face() {
		let mut rng = StdRng::seed_from_u64(2);
		let summary = dice_roll(&mut rng, 6000).unwrap();
		let total: usize = (1..=DIE_FACES).map(|face| summary.count(face)).sum();
		assert_eq!(total, 6000);
		for face in 1..=DIE_FACES {
			assert!(summary.count(face) > 800, "face {} underrepresented", face);
		}
		assert_eq!(summary.count(0), 0);
		assert_eq!(summary.count(7), 0);
	}

	#[test]
	fn dice_roll_display_lists_all_faces() {
		let summary = DiceRollSummary { trials: 2, counts: [1, 0, 0, 0, 0, 1] };
		let text = summary.to_string();
		assert_eq!(text.lines().count(), DIE_FACES);
		assert!(text.starts_with("Face 1: 1 times (50%)"));
		assert!(text.contains("Face 3: 0 times (0%)"));
	}

	#[test]
	fn normal_sample_statistics() {
		let mut rng = StdRng::seed_from_u64(3);
		let sample = sample_normal(&mut rng, 10_000, 5.0, 2.0).unwrap();
		assert_eq!(sample.values().len(), 10_000);
		assert!((sample.mean().unwrap() - 5.0).abs() < 0.1);
		assert!((sample.std_dev().unwrap() - 2.0).abs() < 0.1);
		assert_eq!(sample.preview(10), &sample.values()[..10]);
	}

	#[test]
	fn normal_sample_edge_cases() {
		let mut rng = StdRng::seed_from_u64(4);
		let empty = sample_normal(&mut rng, 0, 0.0, 1.0).unwrap();
		assert!(empty.values().is_empty());
		assert_eq!(empty.mean(), None);
		assert!(empty.preview(10).is_empty());

		let constant = sample_normal(&mut rng, 3, 1.5, 0.0).unwrap();
		assert_eq!(constant.values(), &[1.5, 1.5, 1.5]);

		assert!(matches!(sample_normal(&mut rng, 3, 0.0, -1.0), Err(SimError::InvalidDistribution(_))));
		assert!(matches!(sample_normal(&mut rng, 3, f64::NAN, 1.0), Err(SimError::InvalidDistribution(_))));
	}
}
