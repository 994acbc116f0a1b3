//! Fan-out/fan-in execution of independent sampling tasks.
//!
//! The estimators only need one concurrency primitive: run `K` independent closures, each
//! producing one partial result, and collect all `K` results before proceeding. No ordering
//! among the tasks is required and no state is shared across them; each task owns its random
//! number stream and its accumulator.

use crate::core::IntegrationError;

use crossbeam as cb;

/// Run every task on its own scoped thread and collect the results in input order.
///
/// There is no partial-completion contract: if any task fails, the whole batch fails with that
/// task's error and the remaining results are discarded.
pub fn run_concurrently<T, F>(tasks: Vec<F>) -> Result<Vec<T>, IntegrationError>
where
    T: Send,
    F: FnOnce() -> Result<T, IntegrationError> + Send,
{
    cb::thread::scope(|s| {
        let handles = tasks
            .into_iter()
            .map(|task| s.spawn(move |_| task()))
            .collect::<Vec<_>>();

        // wait for the threads to finish
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Result<Vec<_>, _>>()
    })
    .unwrap()
}
