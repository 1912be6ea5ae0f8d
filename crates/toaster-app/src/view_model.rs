//! The view-model transform contract and shared pipeline stages

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use toaster_core::prelude::*;
use toaster_core::{ApiFailure, ApiResult, Backend, NameCheck, MAX_CLIP_TITLE_CHARS};

use crate::reactive::{subject, CancelBag, Events, Subject};

/// Presentation logic of one screen
///
/// `transform` is called exactly once, when the screen is built. It wires
/// every input stream to the output streams through stages spawned into
/// `bag`; the screen keeps the bag (and so the pipelines) alive for as long as
/// it exists. State that must outlive a single event lives in explicit
/// [`crate::reactive::Cached`] fields on the view-model.
pub trait ViewModel {
    type Input;
    type Output;

    fn transform(&mut self, input: Self::Input, bag: &mut CancelBag) -> Self::Output;
}

/// Turns backend results into outputs and reports an expired session once
#[derive(Debug, Clone)]
pub struct SessionGuard {
    expired: Arc<AtomicBool>,
    tx: Subject<()>,
}

impl SessionGuard {
    /// A guard and the stream on which it reports expiry (at most one event)
    pub fn new() -> (Self, Events<()>) {
        let (tx, events) = subject();
        (
            Self {
                expired: Arc::new(AtomicBool::new(false)),
                tx,
            },
            events,
        )
    }

    pub fn expire(&self) {
        if !self.expired.swap(true, Ordering::SeqCst) {
            info!("Session expired; returning to login");
            self.tx.send(());
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    /// Keep successes only. Unauthorized expires the session; every other
    /// failure is logged and dropped.
    pub fn resolve<T>(&self, call: &str, result: ApiResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(ApiFailure::Unauthorized) => {
                self.expire();
                None
            }
            Err(failure) => {
                warn!("{} failed: {}", call, failure);
                None
            }
        }
    }

    /// Like [`SessionGuard::resolve`], but hand non-authorization failures
    /// back for screens that report an outcome either way
    pub fn resolve_outcome<T>(&self, call: &str, result: ApiResult<T>) -> Option<ApiResult<T>> {
        match result {
            Err(ApiFailure::Unauthorized) => {
                self.expire();
                None
            }
            Err(failure) => {
                debug!("{} failed: {}", call, failure);
                Some(Err(failure))
            }
            ok => Some(ok),
        }
    }
}

/// A network stage: one request per trigger, at most one in flight, and only
/// successful responses come out
pub fn request<T, U, F, Fut>(
    trigger: Events<T>,
    bag: &mut CancelBag,
    guard: &SessionGuard,
    call: &'static str,
    f: F,
) -> Events<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ApiResult<U>> + Send + 'static,
{
    let guard = guard.clone();
    trigger
        .then(bag, f)
        .filter_map(bag, move |result| guard.resolve(call, result))
}

/// Validate a clip title as it is typed
///
/// Titles are debounced and deduplicated first, so a burst of keystrokes
/// costs one backend call. Titles over the length limit never reach the
/// backend.
pub fn clip_name_checks<A: Backend>(
    api: Arc<A>,
    titles: Events<String>,
    quiet: Duration,
    guard: &SessionGuard,
    bag: &mut CancelBag,
) -> Events<NameCheck> {
    let settled = titles.debounce(bag, quiet).remove_duplicates(bag);
    request(settled, bag, guard, "check_clip_name", move |title: String| {
        let api = api.clone();
        async move { check_clip_name(api.as_ref(), title).await }
    })
}

async fn check_clip_name<A: Backend>(api: &A, title: String) -> ApiResult<NameCheck> {
    if title.chars().count() > MAX_CLIP_TITLE_CHARS {
        return Ok(NameCheck::TooLong);
    }
    if title.is_empty() {
        return Ok(NameCheck::Available);
    }
    let duplicated = api.check_clip_name(title).await?;
    Ok(if duplicated {
        NameCheck::Duplicated
    } else {
        NameCheck::Available
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ToasterApi;

    #[test]
    fn test_guard_reports_expiry_once() {
        let (guard, mut expired) = SessionGuard::new();

        assert_eq!(guard.resolve::<()>("a", Err(ApiFailure::Unauthorized)), None);
        assert_eq!(guard.resolve::<()>("b", Err(ApiFailure::Unauthorized)), None);

        assert_eq!(expired.drain(), vec![()]);
        assert!(guard.is_expired());
    }

    #[test]
    fn test_guard_drops_network_failures_silently() {
        let (guard, mut expired) = SessionGuard::new();

        assert_eq!(guard.resolve::<()>("a", Err(ApiFailure::NetworkFail)), None);
        assert_eq!(guard.resolve::<()>("a", Err(ApiFailure::NotFound)), None);
        assert_eq!(guard.resolve("a", Ok(5)), Some(5));

        assert!(expired.drain().is_empty());
    }

    #[test]
    fn test_resolve_outcome_keeps_recoverable_failures() {
        let (guard, _expired) = SessionGuard::new();

        assert_eq!(
            guard.resolve_outcome::<()>("save", Err(ApiFailure::BadRequest)),
            Some(Err(ApiFailure::BadRequest))
        );
        assert_eq!(
            guard.resolve_outcome::<()>("save", Err(ApiFailure::Unauthorized)),
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_checks_debounce_keystrokes_into_one_call() {
        let api = Arc::new(MemoryApi::new());
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (typed, titles) = subject();
        let mut checks = clip_name_checks(
            api.clone(),
            titles,
            Duration::from_millis(200),
            &guard,
            &mut bag,
        );

        for text in ["a", "ab", "abc"] {
            typed.send(text.to_string());
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(api.calls_to(Endpoint::CheckClipName), vec!["abc"]);
        assert_eq!(checks.drain(), vec![NameCheck::Available]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_checks_skip_backend_for_long_titles() {
        let api = Arc::new(MemoryApi::new());
        api.insert_clip("Reading");
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (typed, titles) = subject();
        let mut checks = clip_name_checks(
            api.clone(),
            titles,
            Duration::from_millis(200),
            &guard,
            &mut bag,
        );

        typed.send("a".repeat(16));
        tokio::time::sleep(Duration::from_millis(300)).await;
        typed.send("Reading".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(
            checks.drain(),
            vec![NameCheck::TooLong, NameCheck::Duplicated]
        );
        assert_eq!(api.calls_to(Endpoint::CheckClipName), vec!["Reading"]);
    }
}
