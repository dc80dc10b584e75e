//! Probability and statistics demonstrations.
//!
//! This crate provides small, self-contained stochastic routines:
//! - Coin toss and dice roll Monte Carlo simulations
//! - Normal-distribution sampling
//! - A single-word Naive Bayes classifier with Laplace smoothing
//! - A discrete-time Markov chain walker
//!
//! Randomness is always injected: the samplers take a `rand::Rng`, the
//! walker takes a `UniformSource`. Nothing owns a global generator.

/// Classifier and Markov chain models.
pub mod model;

/// Coin, dice and normal-distribution samplers.
pub mod sampling;

/// Injectable uniform draws (`UniformSource`) and its implementations.
pub mod random;

/// Parameters of a demonstration run.
pub mod simulation_input;

/// Crate error type.
pub mod error;

pub use error::{Result, SimError};
pub use model::markov_walk::{MarkovWalk, walk};
pub use model::naive_bayes::NaiveBayes;
pub use model::transition_table::TransitionTable;
pub use random::{RngSource, SequenceSource, UniformSource};
