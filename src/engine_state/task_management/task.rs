//! # Task System Core Traits
//!
//! This module defines the building blocks the worker pool moves between
//! threads.
//!
//! ## Core Components
//! - `Task`: A unit of work evaluated on a worker thread
//! - `TaskResult`: The worker's output, applied to the world on the caller thread
//! - `TaskOutcome`: What a worker sends back, a result or a caught panic
//!
//! ## Task Lifecycle
//! 1. A `Task` is handed to `TaskManager::run_to_completion()`
//! 2. The task's `process()` method runs on a worker thread
//! 3. The worker sends back the boxed `TaskResult`, or the task's origin if it panicked
//! 4. The result's `handle_result()` runs on the calling thread with the world
//!
//! ## Thread Safety
//! - Tasks never see the world; they own everything they need
//! - `handle_result()` is the only place results touch the world, so all
//!   mutation is serialized through the single result consumer

use crate::engine_state::voxels::world::VoxelWorld;

/// A unit of work that can be executed on a worker thread.
///
/// Tasks must own their inputs. They are `'static` and are dropped on the
/// worker once processed.
pub trait Task: Send {
    /// World `(x, z)` of the first column the task covers, used to report
    /// which piece of work failed.
    fn origin(&self) -> (i32, i32);

    /// Performs the work and packages it for the calling thread.
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be applied on the calling thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The output of a `Task`, applied serially on the calling thread.
pub trait TaskResult: Send {
    /// Writes the result into the world.
    ///
    /// # Arguments
    /// * `world` - The world being generated
    ///
    /// # Returns
    /// Counters describing the work the task did.
    fn handle_result(self: Box<Self>, world: &mut VoxelWorld) -> TaskReport;
}

/// Per-task counters accumulated into the generation summary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskReport {
    /// Cells the callback was evaluated for
    pub cells_visited: usize,
    /// Cells written back into the world
    pub cells_written: usize,
}

/// What a worker sends back for each task it receives.
pub enum TaskOutcome {
    /// The task finished normally.
    Completed(Box<dyn TaskResult + Send>),
    /// The task panicked.
    Panicked {
        /// The task's `Task::origin()`
        origin: (i32, i32),
    },
}
