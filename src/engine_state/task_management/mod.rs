//! # Task Management System
//!
//! This module provides the fixed-size worker pool that runs generation tiles
//! in parallel.
//!
//! ## Architecture Overview
//!
//! The task management system consists of several key components:
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The output of a task, applied on the calling thread
//! - `TaskChannel`: The dispatch side of one worker
//!
//! Every worker owns a dedicated task channel. All workers share one result
//! channel back to the manager, tagging each outcome with their index so the
//! manager knows which worker became free.
//!
//! ## Task Lifecycle
//! 1. A batch of tasks is handed to `TaskManager::run_to_completion()`
//! 2. The manager distributes tasks to free workers round-robin, queueing the rest
//! 3. Workers process tasks and send back results, catching panics
//! 4. Each result is applied on the calling thread as it arrives
//! 5. Freed workers immediately receive the next queued task
//! 6. The call returns once every task has reported back
//!
//! ## Performance Considerations
//! - **Task Granularity**: One task per 32×32 column tile keeps the channel
//!   overhead negligible next to the callback work
//! - **Memory**: Each task owns its inputs and returns an owned buffer, so
//!   workers never contend on shared state
//! - **Shutdown**: Dropping the manager closes every task channel and joins
//!   the workers

pub mod task;

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};
use task::{Task, TaskOutcome, TaskResult};

use crate::error::GenerationError;

/// The dispatch side of a single worker thread.
#[derive(Debug)]
struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    num_tasks_in_flight: usize,
    /// Cleared when a send fails because the worker has exited.
    alive: bool,
    worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// # Fields
/// - `channels`: One dispatch channel per worker
/// - `result_receiver`: Shared channel every worker reports back on
/// - `queued_tasks`: Tasks waiting for a free worker
/// - `current_channel`: Index for round-robin scheduling
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    result_receiver: Receiver<(usize, TaskOutcome)>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks in flight per worker channel.
///
/// With one task per worker, a worker only receives new work once it has
/// reported back, so a slow tile never holds queued work hostage.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a pool with the given number of worker threads (at least one).
    ///
    /// # Panics
    /// Panics if the underlying thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        let num_workers = num_workers.max(1);
        let (result_tx, result_rx) = channel::<(usize, TaskOutcome)>();
        let mut channels = Vec::with_capacity(num_workers);

        for worker_idx in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let result_tx = result_tx.clone();

            let worker = thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let origin = task.origin();
                    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| task.process())) {
                        Ok(result) => TaskOutcome::Completed(result),
                        Err(_) => TaskOutcome::Panicked { origin },
                    };
                    if result_tx.send((worker_idx, outcome)).is_err() {
                        break;
                    }
                }
            });

            channels.push(TaskChannel {
                task_sender: task_tx,
                num_tasks_in_flight: 0,
                alive: true,
                worker,
            });
        }

        debug!("Spawned {num_workers} worker threads");

        TaskManager {
            channels,
            result_receiver: result_rx,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Creates a pool sized to the machine's available parallelism.
    pub fn with_available_parallelism() -> Self {
        let parallelism = thread::available_parallelism();
        info!("Available parallelism: {parallelism:?}");
        Self::new(parallelism.map_or(1, |n| n.get()))
    }

    /// Number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.channels.len()
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was handed to the worker
    /// - `Err(task)` if the worker has exited; the channel is marked dead
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        match channel.task_sender.send(task) {
            Ok(()) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                warn!("Worker {channel_idx} has exited, no longer dispatching to it");
                channel.alive = false;
                Err(task.0)
            }
        }
    }

    /// Finds the next live worker with spare capacity, round-robin from the
    /// last used channel.
    fn find_available_channel(&self) -> Option<usize> {
        let count = self.channels.len();
        (0..count)
            .map(|step| (self.current_channel + step) % count)
            .find(|&idx| {
                let channel = &self.channels[idx];
                channel.alive && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Publishes a task, queueing it if every worker is busy.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on a worker
    /// - `false` if the task was queued
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        let mut task = task;
        while let Some(channel_idx) = self.find_available_channel() {
            match self.try_send_task(task, channel_idx) {
                Ok(()) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    return true;
                }
                Err(returned) => task = returned,
            }
        }
        self.queued_tasks.push_back(task);
        false
    }

    /// Moves queued tasks onto free workers, oldest first, until the queue is
    /// empty or every worker is busy.
    pub fn process_queued_tasks(&mut self) {
        while self.find_available_channel().is_some() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };
            if !self.publish_task(task) {
                // Re-queued at the back by `publish_task`; restore its place.
                if let Some(task) = self.queued_tasks.pop_back() {
                    self.queued_tasks.push_front(task);
                }
                return;
            }
        }
    }

    fn tasks_in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// Runs a batch of tasks and blocks until every one has reported back.
    ///
    /// Each completed result is passed to `on_result` on the calling thread in
    /// completion order. A panicking task does not stop the batch: the
    /// remaining tasks still run and their results are still delivered.
    ///
    /// # Errors
    /// - `WorkerPanicked` with the origin of the first task that panicked
    /// - `PoolDisconnected` if every worker exits with tasks outstanding
    pub fn run_to_completion<F>(
        &mut self,
        tasks: Vec<Box<dyn Task + Send>>,
        mut on_result: F,
    ) -> Result<(), GenerationError>
    where
        F: FnMut(Box<dyn TaskResult + Send>),
    {
        let mut pending = tasks.len();
        for task in tasks {
            self.publish_task(task);
        }

        let mut first_panic = None;
        while pending > 0 {
            if self.tasks_in_flight() == 0 {
                self.queued_tasks.clear();
                return Err(GenerationError::PoolDisconnected { pending });
            }

            let (worker_idx, outcome) = self.result_receiver.recv().map_err(|_| {
                GenerationError::PoolDisconnected { pending }
            })?;
            self.channels[worker_idx].num_tasks_in_flight -= 1;
            pending -= 1;
            self.process_queued_tasks();

            match outcome {
                TaskOutcome::Completed(result) => on_result(result),
                TaskOutcome::Panicked { origin: (x, z) } => {
                    warn!("Task at ({x}, {z}) panicked on worker {worker_idx}");
                    first_panic.get_or_insert(GenerationError::WorkerPanicked { x, z });
                }
            }
        }

        match first_panic {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for (idx, channel) in self.channels.drain(..).enumerate() {
            let TaskChannel {
                task_sender, worker, ..
            } = channel;
            drop(task_sender);
            if worker.join().is_err() {
                warn!("Worker {idx} exited abnormally");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::task::TaskReport;
    use super::*;
    use crate::engine_state::rendering::Geometry;
    use crate::engine_state::voxels::world::{MeshingMode, VoxelWorld, WorldDimensions};

    struct CountingTask {
        x: i32,
        counter: Arc<AtomicUsize>,
        explode: bool,
    }

    struct CountingResult {
        x: i32,
    }

    impl Task for CountingTask {
        fn origin(&self) -> (i32, i32) {
            (self.x, 0)
        }

        fn process(&self) -> Box<dyn TaskResult + Send> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            if self.explode {
                panic!("boom");
            }
            Box::new(CountingResult { x: self.x })
        }
    }

    impl TaskResult for CountingResult {
        fn handle_result(self: Box<Self>, world: &mut VoxelWorld) -> TaskReport {
            world.set_voxel(self.x, 0, 0, 1);
            TaskReport {
                cells_visited: 1,
                cells_written: 1,
            }
        }
    }

    fn world() -> VoxelWorld {
        VoxelWorld::new(
            WorldDimensions {
                chunk_size: 8,
                world_size_x: 1,
                world_size_z: 1,
                max_height: 1,
                voxel_size: 1.0,
            },
            Geometry::cube(),
            MeshingMode::Instanced,
        )
    }

    fn tasks(counter: &Arc<AtomicUsize>, explode_at: Option<i32>) -> Vec<Box<dyn Task + Send>> {
        (0..8)
            .map(|x| {
                Box::new(CountingTask {
                    x,
                    counter: Arc::clone(counter),
                    explode: explode_at == Some(x),
                }) as Box<dyn Task + Send>
            })
            .collect()
    }

    #[test]
    fn runs_more_tasks_than_workers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut manager = TaskManager::new(3);
        let mut world = world();

        manager
            .run_to_completion(tasks(&counter, None), |result| {
                result.handle_result(&mut world);
            })
            .unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 8);
        assert_eq!(world.active_voxels(), 8);
        assert_eq!(manager.tasks_in_flight(), 0);
    }

    #[test]
    fn panicking_task_is_reported_after_the_batch_drains() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut manager = TaskManager::new(2);
        let mut world = world();

        let error = manager
            .run_to_completion(tasks(&counter, Some(5)), |result| {
                result.handle_result(&mut world);
            })
            .unwrap_err();

        assert!(matches!(error, GenerationError::WorkerPanicked { x: 5, z: 0 }));
        assert_eq!(counter.load(Ordering::SeqCst), 8);
        assert_eq!(world.active_voxels(), 7);
        assert_eq!(world.get_voxel(5, 0, 0), 0);

        // The pool survives and can run another batch.
        manager
            .run_to_completion(tasks(&counter, None), |_| {})
            .unwrap();
    }

    #[test]
    fn zero_workers_still_gets_one() {
        let manager = TaskManager::new(0);
        assert_eq!(manager.worker_count(), 1);
    }
}
