use std::fmt;

/// State of a running k-means calculation.
/// Both non-[`RunStatus::Running`] states are terminal, and both are successful outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
	/// Iterations continue
	Running,
	/// An assignment pass changed no label
	Converged,
	/// The iteration cap was reached while labels were still changing
	IterationLimitReached
}
impl RunStatus {
	pub fn is_terminal(&self) -> bool {
		*self != RunStatus::Running
	}
}
impl fmt::Display for RunStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			RunStatus::Running => "running",
			RunStatus::Converged => "converged",
			RunStatus::IterationLimitReached => "iteration limit reached"
		})
	}
}

/// Owns the iteration counter and the "changed" flag lifecycle of one run.
///
/// Starts as `(iteration_count = 0, changed = true)` in [`RunStatus::Running`]. Every completed
/// assignment + update step is reported via [`ConvergenceController::next`].
#[derive(Clone, Debug)]
pub struct ConvergenceController {
	max_iterations: usize,
	iteration_count: usize,
	changed: bool,
	status: RunStatus
}
impl ConvergenceController {
	pub fn new(max_iterations: usize) -> Self {
		Self { max_iterations, iteration_count: 0, changed: true, status: RunStatus::Running }
	}

	/// Record one completed iteration.
	/// ## Arguments
	/// - **changed**: Whether the iteration's assignment pass changed any label
	/// ## Returns
	/// The state after this iteration. Once terminal, further calls neither count nor change it.
	pub fn next(&mut self, changed: bool) -> RunStatus {
		if self.status.is_terminal() {
			return self.status;
		}
		self.iteration_count += 1;
		self.changed = changed;
		self.status = if !changed {
			RunStatus::Converged
		} else if self.iteration_count >= self.max_iterations {
			RunStatus::IterationLimitReached
		} else {
			RunStatus::Running
		};
		self.status
	}

	pub fn iteration_count(&self) -> usize { self.iteration_count }
	pub fn changed(&self) -> bool { self.changed }
	pub fn status(&self) -> RunStatus { self.status }
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn initial_state() {
		let ctrl = ConvergenceController::new(10);
		assert_eq!(ctrl.iteration_count(), 0);
		assert!(ctrl.changed());
		assert_eq!(ctrl.status(), RunStatus::Running);
	}

	#[test]
	fn converges_on_first_unchanged_iteration() {
		let mut ctrl = ConvergenceController::new(10);
		assert_eq!(ctrl.next(true), RunStatus::Running);
		assert_eq!(ctrl.next(true), RunStatus::Running);
		assert_eq!(ctrl.next(false), RunStatus::Converged);
		assert_eq!(ctrl.iteration_count(), 3);
		assert!(!ctrl.changed());
	}

	#[test]
	fn stops_at_iteration_limit() {
		let mut ctrl = ConvergenceController::new(3);
		assert_eq!(ctrl.next(true), RunStatus::Running);
		assert_eq!(ctrl.next(true), RunStatus::Running);
		assert_eq!(ctrl.next(true), RunStatus::IterationLimitReached);
		assert_eq!(ctrl.iteration_count(), 3);
	}

	#[test]
	fn convergence_wins_over_limit() {
		let mut ctrl = ConvergenceController::new(1);
		assert_eq!(ctrl.next(false), RunStatus::Converged);
	}

	#[test]
	fn terminal_states_are_sticky() {
		let mut ctrl = ConvergenceController::new(2);
		ctrl.next(false);
		assert_eq!(ctrl.next(true), RunStatus::Converged);
		assert_eq!(ctrl.iteration_count(), 1);
	}

	#[test]
	fn counter_never_decreases() {
		let mut ctrl = ConvergenceController::new(50);
		let mut prev = ctrl.iteration_count();
		for i in 0..100 {
			ctrl.next(i % 7 != 6 || i < 40);
			assert!(ctrl.iteration_count() >= prev);
			assert!(ctrl.iteration_count() <= 50);
			prev = ctrl.iteration_count();
		}
		assert!(ctrl.status().is_terminal());
	}
}
