//! Background planning on a worker thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::error::PlanError;
use crate::routes::RouteSet;

/// Handle to a route search running on its own thread.
///
/// The search checks for cancellation and its deadline periodically and
/// stops with [`PlanError::Interrupted`] when asked to. Dropping the handle
/// cancels the search and detaches the thread.
#[derive(Debug)]
pub struct PlanTask {
    handle: Option<JoinHandle<Result<RouteSet, PlanError>>>,
    cancel: Arc<AtomicBool>,
}

impl PlanTask {
    pub(crate) fn new(handle: JoinHandle<Result<RouteSet, PlanError>>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            handle: Some(handle),
            cancel,
        }
    }

    /// Ask the search to stop. Returns immediately.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Whether the worker has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the search to finish.
    pub fn join(mut self) -> Result<RouteSet, PlanError> {
        let Some(handle) = self.handle.take() else {
            return Err(PlanError::WorkerPanicked);
        };
        handle.join().unwrap_or_else(|_| {
            log::warn!("route planning worker panicked");
            Err(PlanError::WorkerPanicked)
        })
    }
}

impl Drop for PlanTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel();
        }
    }
}
