//! Reactive plumbing for view-model transforms
//!
//! A [`Subject`] is the sending half of an event channel and [`Events`] the
//! receiving half. Operators (see `operators.rs`) consume an `Events`, spawn
//! one task into a [`CancelBag`] and hand back a new `Events`. Dropping the
//! bag aborts every stage it owns, which is how a screen's pipelines end.

mod operators;

#[cfg(test)]
mod tests;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Create a connected subject/events pair
pub fn subject<T>() -> (Subject<T>, Events<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        Subject { tx },
        Events {
            inner: UnboundedReceiverStream::new(rx),
        },
    )
}

// ─────────────────────────────────────────────────────────────────
// Subject
// ─────────────────────────────────────────────────────────────────

/// Push side of an event channel
pub struct Subject<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<T> Subject<T> {
    /// Emit a value. Returns `false` once nobody is listening.
    pub fn send(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ─────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────

/// Pull side of an event channel; ends when every subject is dropped
pub struct Events<T> {
    inner: UnboundedReceiverStream<T>,
}

impl<T> fmt::Debug for Events<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Events").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Events<T> {
    /// A stream that has already ended
    pub fn empty() -> Self {
        let (_, events) = subject();
        events
    }

    /// Adapt any stream, draining it on a task owned by `bag`
    pub fn from_stream<S>(stream: S, bag: &mut CancelBag) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        let (tx, events) = subject();
        bag.spawn(async move {
            let mut stream = std::pin::pin!(stream);
            while let Some(value) = stream.next().await {
                if !tx.send(value) {
                    break;
                }
            }
        });
        events
    }

    /// Wait for the next value
    pub async fn recv(&mut self) -> Option<T> {
        self.inner.next().await
    }

    /// Take a value that is already queued, without waiting
    pub fn try_recv(&mut self) -> Option<T> {
        self.inner.as_mut().try_recv().ok()
    }

    /// Everything queued right now
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl<T> Stream for Events<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

// ─────────────────────────────────────────────────────────────────
// CancelBag
// ─────────────────────────────────────────────────────────────────

/// Owns the tasks of one screen's pipelines; aborts them all on drop
#[derive(Default)]
pub struct CancelBag {
    tasks: JoinSet<()>,
}

impl fmt::Debug for CancelBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelBag")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl CancelBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Number of tasks spawned and not yet reaped
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn cancel(&mut self) {
        self.tasks.abort_all();
    }
}

// ─────────────────────────────────────────────────────────────────
// Cached
// ─────────────────────────────────────────────────────────────────

/// A view-model field shared with the pipeline tasks that read and write it
pub struct Cached<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Cached<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Cached<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cached").field(&*self.lock()).finish()
    }
}

impl<T> Cached<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, value: T) {
        *self.lock() = value;
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<T: Clone> Cached<T> {
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}
