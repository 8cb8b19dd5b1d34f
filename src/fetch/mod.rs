//! Generation-keyed, abortable requests.
//!
//! Each controller owns one [`RequestTracker`] per kind of fetch. Starting a
//! request aborts whatever the tracker still has in flight and bumps the
//! generation; a [`Completed`] result is only applied while its generation is
//! still the latest, so a slow superseded response can never overwrite the
//! state produced by a newer one.

use crate::error::FetchError;
use futures::future::{AbortHandle, Abortable, BoxFuture};
use futures::FutureExt;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes any in-flight request and wraps `future` as the new one.
    pub fn start<T, F>(&mut self, future: F) -> Pending<T>
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
        T: Send + 'static,
    {
        if let Some(previous) = self.in_flight.take() {
            log::debug!("Aborting superseded request generation {}", self.generation);
            previous.abort();
        }

        self.generation += 1;
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);

        Pending {
            ticket: Ticket {
                generation: self.generation,
            },
            future: Abortable::new(future.boxed(), registration),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Accepts a finished request. Returns `None` when it was superseded.
    pub fn accept<T>(&mut self, completed: Completed<T>) -> Option<Result<T, FetchError>> {
        if !self.is_current(&completed.ticket) {
            log::debug!(
                "Discarding stale response (generation {}, latest {})",
                completed.ticket.generation,
                self.generation
            );
            return None;
        }
        self.in_flight = None;
        match completed.status {
            FetchStatus::Success(value) => Some(Ok(value)),
            FetchStatus::Failed(e) => Some(Err(e)),
            FetchStatus::Aborted => None,
        }
    }

    /// Aborts the in-flight request without starting a new one.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
    }
}

#[must_use = "a pending request does nothing until resolved"]
pub struct Pending<T> {
    ticket: Ticket,
    future: Abortable<BoxFuture<'static, Result<T, FetchError>>>,
}

impl<T> Pending<T> {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Drives the request to completion. Owns nothing of the controller, so
    /// several pending requests may be in flight at once.
    pub async fn resolve(self) -> Completed<T> {
        let status = match self.future.await {
            Ok(Ok(value)) => FetchStatus::Success(value),
            Ok(Err(e)) => FetchStatus::Failed(e),
            Err(_aborted) => FetchStatus::Aborted,
        };
        Completed {
            ticket: self.ticket,
            status,
        }
    }
}

#[derive(Debug)]
pub enum FetchStatus<T> {
    Success(T),
    Failed(FetchError),
    Aborted,
}

#[derive(Debug)]
pub struct Completed<T> {
    pub ticket: Ticket,
    pub status: FetchStatus<T>,
}
