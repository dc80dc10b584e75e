use std::collections::BTreeMap;
use std::iter::FusedIterator;

use log::{debug, trace, warn};

use super::transition_table::TransitionTable;
use crate::error::{Result, SimError};
use crate::random::UniformSource;

/// One stochastic trajectory through a `TransitionTable`.
///
/// Yields exactly `steps` states unless an error occurs. Each step reports
/// the current state first, then samples the transition:
/// - draw `r` in `[0, 1)`
/// - scan the current row in destination order, summing probabilities
/// - move to the first destination whose running sum is `>= r`
///
/// If the row sums to less than `r`, no destination is selected and the
/// walk stays in place for the next step.
///
/// A state must have a row in the table when it is reported; otherwise the
/// walk yields `UnknownState` and ends. The state reached by the final
/// transition is never reported and so is not checked.
///
/// The table and the draw source are borrowed for the lifetime of the walk;
/// reported states borrow from the table only.
pub struct MarkovWalk<'a, 's, S: UniformSource + ?Sized> {
	table: &'a TransitionTable,
	current: &'a str,
	remaining: usize,
	source: &'s mut S,
}

impl<'a, 's, S: UniformSource + ?Sized> MarkovWalk<'a, 's, S> {
	/// Prepares a walk of `steps` states starting at `start`.
	///
	/// # Errors
	/// Returns `UnknownState` if `start` has no row, even when `steps == 0`.
	pub fn new(table: &'a TransitionTable, start: &str, steps: usize, source: &'s mut S) -> Result<Self> {
		let (current, _) = table.entry(start).ok_or_else(|| SimError::UnknownState {
			state: start.to_owned(),
		})?;
		debug!("Starting walk at '{}' for {} steps", current, steps);
		Ok(Self { table, current, remaining: steps, source })
	}
}

impl<'a, S: UniformSource + ?Sized> Iterator for MarkovWalk<'a, '_, S> {
	type Item = Result<&'a str>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.remaining == 0 {
			return None;
		}

		let table = self.table;
		let Some((state, row)) = table.entry(self.current) else {
			self.remaining = 0;
			return Some(Err(SimError::UnknownState { state: self.current.to_owned() }));
		};
		self.remaining -= 1;

		let r = self.source.next_uniform();
		match select_destination(row, r) {
			Some(next) => {
				trace!("'{}' -> '{}' (r = {})", state, next, r);
				self.current = next;
			}
			None => warn!("Row '{}' sums below r = {}, staying in place", state, r),
		}

		Some(Ok(state))
	}
}

impl<S: UniformSource + ?Sized> FusedIterator for MarkovWalk<'_, '_, S> {}

/// Runs a whole walk and collects the visited states.
///
/// # Errors
/// Returns `UnknownState` if `start`, or any state that must be reported,
/// has no row. No partial trajectory is returned.
pub fn walk<'a, S: UniformSource + ?Sized>(
	table: &'a TransitionTable,
	start: &str,
	steps: usize,
	source: &mut S,
) -> Result<Vec<&'a str>> {
	MarkovWalk::new(table, start, steps, source)?.collect()
}

/// First destination whose cumulative probability reaches `r`.
fn select_destination(row: &BTreeMap<String, f64>, r: f64) -> Option<&str> {
	let mut cumulative = 0.0;
	for (destination, probability) in row {
		cumulative += probability;
		if r <= cumulative {
			return Some(destination.as_str());
		}
	}
	None
}
