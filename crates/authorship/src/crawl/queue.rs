//! Shared work queue consumed by crawl workers.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::platform::PlatformRepo;

/// Repositories still waiting for a worker.
///
/// The queue is filled once and only drained; an empty queue tells a worker
/// to stop. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<PlatformRepo>>,
}

impl WorkQueue {
    pub fn new(repos: impl IntoIterator<Item = PlatformRepo>) -> Self {
        Self {
            items: Mutex::new(repos.into_iter().collect()),
        }
    }

    /// Remove and return the next repository, or `None` when the queue is drained.
    ///
    /// No two callers ever receive the same repository.
    pub fn claim(&self) -> Option<PlatformRepo> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
