//! Background execution of dispatch requests.
//!
//! The library itself is synchronous. Callers that must keep a thread free
//! (a UI loop, a server) submit requests here and collect the result from a
//! [`Completion`] or a callback. There is no retry, timeout or cancellation;
//! the only internal time limit is the factorization budget.

use crate::dispatch::{AnalysisResult, Dispatcher, NormalizedRequest};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Handle to a result that is delivered exactly once.
#[derive(Debug)]
pub struct Completion {
    receiver: Receiver<AnalysisResult>,
}

impl Completion {
    /// Blocks until the task finishes. `None` if the worker went away
    /// without sending, which only happens when the pool is torn down.
    pub fn wait(self) -> Option<AnalysisResult> {
        self.receiver.recv().ok()
    }

    /// Returns the result if it is ready, without blocking.
    pub fn try_take(&self) -> Option<AnalysisResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// A fixed-size pool running [`Dispatcher::dispatch`] off the caller's thread.
pub struct TaskPool {
    pool: ThreadPool,
    dispatcher: Arc<Dispatcher>,
}

impl TaskPool {
    /// Builds a pool with `threads` workers; `0` lets rayon pick.
    pub fn new(dispatcher: Dispatcher, threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("alterm-worker-{}", i))
            .build()?;
        Ok(Self {
            pool,
            dispatcher: Arc::new(dispatcher),
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queues a request and returns a handle for its result.
    pub fn submit(&self, request: NormalizedRequest) -> Completion {
        let (sender, receiver) = mpsc::sync_channel(1);
        self.submit_with(request, move |result| {
            if sender.send(result).is_err() {
                tracing::debug!("completion dropped before the result arrived");
            }
        });
        Completion { receiver }
    }

    /// Queues a request and hands its result to `callback` on a worker thread.
    pub fn submit_with<F>(&self, request: NormalizedRequest, callback: F)
    where
        F: FnOnce(AnalysisResult) + Send + 'static,
    {
        let dispatcher = Arc::clone(&self.dispatcher);
        self.pool.spawn(move || {
            tracing::debug!(operation = request.operation(), "worker picked up request");
            callback(dispatcher.dispatch(&request));
        });
    }

    /// Runs a batch in parallel and returns the results in request order.
    pub fn run_all(&self, requests: &[NormalizedRequest]) -> Vec<AnalysisResult> {
        let dispatcher = &self.dispatcher;
        self.pool
            .install(|| requests.par_iter().map(|r| dispatcher.dispatch(r)).collect())
    }
}
