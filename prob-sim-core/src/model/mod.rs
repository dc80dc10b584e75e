//! Top-level module for the classifier and Markov chain models.
//!
//! This module provides:
//! - A single-word Naive Bayes classifier (`NaiveBayes`)
//! - Markov transition tables (`TransitionTable`)
//! - A table-driven Markov chain walker (`MarkovWalk`)

/// Laplace-smoothed Naive Bayes classifier over `(label, word)` pairs.
///
/// Supports incremental training, merging and single-word prediction.
pub mod naive_bayes;

/// Transition probabilities of a finite-state chain.
///
/// Ordered rows, builder-style construction and an optional
/// row-sum validation pass.
pub mod transition_table;

/// Stochastic walk through a `TransitionTable`.
///
/// Draws come from an injected `UniformSource`, so trajectories are
/// reproducible in tests.
pub mod markov_walk;
