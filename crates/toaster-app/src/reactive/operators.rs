//! Stage combinators
//!
//! Each combinator runs as one task in the caller's [`CancelBag`]. A stage
//! stops when its upstream ends or when nobody listens downstream.

use std::future::Future;
use std::time::Duration;

use super::{subject, CancelBag, Events};

impl<T: Send + 'static> Events<T> {
    pub fn map<U, F>(mut self, bag: &mut CancelBag, mut f: F) -> Events<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        let (tx, out) = subject();
        bag.spawn(async move {
            while let Some(value) = self.recv().await {
                if !tx.send(f(value)) {
                    break;
                }
            }
        });
        out
    }

    pub fn filter_map<U, F>(mut self, bag: &mut CancelBag, mut f: F) -> Events<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> Option<U> + Send + 'static,
    {
        let (tx, out) = subject();
        bag.spawn(async move {
            while let Some(value) = self.recv().await {
                if let Some(mapped) = f(value) {
                    if !tx.send(mapped) {
                        break;
                    }
                }
            }
        });
        out
    }

    pub fn filter<F>(self, bag: &mut CancelBag, mut keep: F) -> Events<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.filter_map(bag, move |value| keep(&value).then_some(value))
    }

    /// Interleave two streams; ends when both have ended
    pub fn merge(self, bag: &mut CancelBag, other: Events<T>) -> Events<T> {
        let (tx, out) = subject();
        for mut input in [self, other] {
            let tx = tx.clone();
            bag.spawn(async move {
                while let Some(value) = input.recv().await {
                    if !tx.send(value) {
                        break;
                    }
                }
            });
        }
        out
    }

    /// Emit a value only after `quiet` has passed without a newer one
    ///
    /// A value still waiting when the upstream ends is emitted.
    pub fn debounce(mut self, bag: &mut CancelBag, quiet: Duration) -> Events<T> {
        let (tx, out) = subject();
        bag.spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    Some(value) => {
                        tokio::select! {
                            next = self.recv() => match next {
                                Some(newer) => pending = Some(newer),
                                None => {
                                    tx.send(value);
                                    break;
                                }
                            },
                            _ = tokio::time::sleep(quiet) => {
                                if !tx.send(value) {
                                    break;
                                }
                            }
                        }
                    }
                    None => match self.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                }
            }
        });
        out
    }

    /// Fold every value into an accumulator and emit the accumulator
    pub fn scan<S, F>(mut self, bag: &mut CancelBag, initial: S, mut f: F) -> Events<S>
    where
        S: Clone + Send + 'static,
        F: FnMut(&mut S, T) + Send + 'static,
    {
        let (tx, out) = subject();
        bag.spawn(async move {
            let mut state = initial;
            while let Some(value) = self.recv().await {
                f(&mut state, value);
                if !tx.send(state.clone()) {
                    break;
                }
            }
        });
        out
    }

    /// Pair every value with the latest value of `source`
    ///
    /// `source` is polled first whenever both have something queued, so a
    /// selection made before a confirm is always the one paired with it.
    pub fn with_latest_from<S>(
        mut self,
        bag: &mut CancelBag,
        mut source: Events<S>,
        initial: S,
    ) -> Events<(T, S)>
    where
        S: Clone + Send + 'static,
    {
        let (tx, out) = subject();
        bag.spawn(async move {
            let mut latest = initial;
            let mut source_open = true;
            loop {
                tokio::select! {
                    biased;
                    value = source.recv(), if source_open => match value {
                        Some(value) => latest = value,
                        None => source_open = false,
                    },
                    trigger = self.recv() => match trigger {
                        Some(trigger) => {
                            if !tx.send((trigger, latest.clone())) {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
        });
        out
    }

    /// Run an async step per value, one at a time, in arrival order
    ///
    /// The next value is not taken until the previous step resolved, so at
    /// most one step is in flight per stage.
    pub fn then<U, F, Fut>(mut self, bag: &mut CancelBag, mut f: F) -> Events<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        let (tx, out) = subject();
        bag.spawn(async move {
            while let Some(value) = self.recv().await {
                let result = f(value).await;
                if !tx.send(result) {
                    break;
                }
            }
        });
        out
    }

    /// Consume the stream
    pub fn for_each<F>(mut self, bag: &mut CancelBag, mut f: F)
    where
        F: FnMut(T) + Send + 'static,
    {
        bag.spawn(async move {
            while let Some(value) = self.recv().await {
                f(value);
            }
        });
    }
}

impl<T: Clone + Send + 'static> Events<T> {
    /// Fan one stream out to `N` independent copies
    pub fn split<const N: usize>(mut self, bag: &mut CancelBag) -> [Events<T>; N] {
        let mut senders = Vec::with_capacity(N);
        let outputs = std::array::from_fn(|_| {
            let (tx, out) = subject();
            senders.push(tx);
            out
        });
        bag.spawn(async move {
            while let Some(value) = self.recv().await {
                senders.retain(|tx| tx.send(value.clone()));
                if senders.is_empty() {
                    break;
                }
            }
        });
        outputs
    }
}

impl<T: PartialEq + Clone + Send + 'static> Events<T> {
    /// Drop values equal to the one emitted just before
    pub fn remove_duplicates(mut self, bag: &mut CancelBag) -> Events<T> {
        let (tx, out) = subject();
        bag.spawn(async move {
            let mut last: Option<T> = None;
            while let Some(value) = self.recv().await {
                if last.as_ref() == Some(&value) {
                    continue;
                }
                last = Some(value.clone());
                if !tx.send(value) {
                    break;
                }
            }
        });
        out
    }
}
