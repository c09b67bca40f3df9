//! Cancellable request handles keyed by logical query.
//!
//! A typeahead search or a page switch should not wait for, or be
//! overwritten by, the response to a request it made obsolete. Running a
//! future in a slot aborts whatever is still in flight for the same key.

use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use tokio::task::AbortHandle;

use crate::Error;

#[derive(Debug, Default)]
pub struct RequestSlots {
    slots: DashMap<String, (u64, AbortHandle)>,
    next_ticket: AtomicU64,
}

impl RequestSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fut` as the current request for `key`, aborting the previous
    /// one.
    ///
    /// Dropping the returned future aborts the request.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - Errors with [`Error::Superseded`] if another request for `key`
    ///   started before this one finished, or the slot was cancelled.
    pub async fn run<F, T>(&self, key: &str, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>> + Send + 'static,
        T: Send + 'static,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(fut);

        if let Some((_, previous)) = self
            .slots
            .insert(key.to_owned(), (ticket, handle.abort_handle()))
        {
            tracing::debug!(key, "superseding in-flight request");
            previous.abort();
        }

        let _guard = SlotGuard {
            slots: &self.slots,
            key,
            ticket,
            abort: handle.abort_handle(),
        };

        match handle.await {
            Ok(output) => output,
            Err(err) if err.is_cancelled() => Err(Error::Superseded),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }

    /// Aborts the in-flight request for `key`, if any.
    pub fn cancel(&self, key: &str) {
        if let Some((_, (_, handle))) = self.slots.remove(key) {
            handle.abort();
        }
    }

    /// Indicates whether a request for `key` is in flight.
    pub fn is_pending(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

/// Aborts a request and frees its slot once its caller stops waiting.
struct SlotGuard<'a> {
    slots: &'a DashMap<String, (u64, AbortHandle)>,
    key: &'a str,
    ticket: u64,
    abort: AbortHandle,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.abort.abort();
        self.slots.remove_if(self.key, |_, (current, _)| *current == self.ticket);
    }
}
