use std::sync::Arc;
use std::time::Duration;

use toaster_core::{Backend, SearchResults};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct SearchInput {
    pub query: Events<String>,
}

pub struct SearchOutput {
    pub results: Events<SearchResults>,
}

pub struct SearchViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
    debounce: Duration,
}

impl<A: Backend> SearchViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard, debounce: Duration) -> Self {
        Self {
            api,
            guard,
            debounce,
        }
    }
}

impl<A: Backend> ViewModel for SearchViewModel<A> {
    type Input = SearchInput;
    type Output = SearchOutput;

    fn transform(&mut self, input: SearchInput, bag: &mut CancelBag) -> SearchOutput {
        let queries = input
            .query
            .debounce(bag, self.debounce)
            .map(bag, |query| query.trim().to_string())
            .remove_duplicates(bag);

        let api = self.api.clone();
        let results = request(queries, bag, &self.guard, "search", move |query: String| {
            let api = api.clone();
            async move {
                if query.is_empty() {
                    return Ok(SearchResults::default());
                }
                api.search(query).await
            }
        });

        SearchOutput { results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use toaster_api::{Endpoint, MemoryApi};

    #[tokio::test(start_paused = true)]
    async fn test_typing_searches_once_per_pause() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (typed, query) = subject();
        let mut output = SearchViewModel::new(api.clone(), guard, Duration::from_millis(200))
            .transform(SearchInput { query }, &mut bag);

        for text in ["r", "ru", "rus", "rust"] {
            typed.send(text.to_string());
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
        typed.send("rust ".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(api.calls_to(Endpoint::Search), vec!["rust"]);
        let results = output.results.drain();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].clips.len(), 1);
        assert_eq!(results[0].toasts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_backend() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _) = SessionGuard::new();
        let (typed, query) = subject();
        let mut output = SearchViewModel::new(api.clone(), guard, Duration::from_millis(200))
            .transform(SearchInput { query }, &mut bag);

        typed.send("   ".to_string());
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(output.results.drain(), vec![SearchResults::default()]);
        assert!(api.calls_to(Endpoint::Search).is_empty());
    }
}
