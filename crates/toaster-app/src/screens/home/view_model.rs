use std::sync::Arc;

use toaster_core::{Backend, ClipSummary, HomeSummary, RecommendedSite, Toast, WeeklyLink};

use crate::reactive::{CancelBag, Events};
use crate::view_model::{request, SessionGuard, ViewModel};

pub struct HomeInput {
    pub appear: Events<()>,
}

pub struct HomeOutput {
    /// Summary with the "All clips" entry leading the clip list
    pub summary: Events<HomeSummary>,
    pub recent: Events<Vec<Toast>>,
    pub weekly: Events<Vec<WeeklyLink>>,
    pub recommended: Events<Vec<RecommendedSite>>,
}

pub struct HomeViewModel<A> {
    api: Arc<A>,
    guard: SessionGuard,
}

impl<A: Backend> HomeViewModel<A> {
    pub fn new(api: Arc<A>, guard: SessionGuard) -> Self {
        Self { api, guard }
    }
}

impl<A: Backend> ViewModel for HomeViewModel<A> {
    type Input = HomeInput;
    type Output = HomeOutput;

    fn transform(&mut self, input: HomeInput, bag: &mut CancelBag) -> HomeOutput {
        let [main, recent, weekly, recommended] = input.appear.split(bag);

        let api = self.api.clone();
        let summary = request(main, bag, &self.guard, "main_page", move |()| {
            let api = api.clone();
            async move { api.main_page().await }
        })
        .map(bag, |summary| HomeSummary {
            clips: std::iter::once(ClipSummary::all_clips(summary.all_toast_count))
                .chain(summary.clips)
                .collect(),
            ..summary
        });

        let api = self.api.clone();
        let recent = request(recent, bag, &self.guard, "recent_toasts", move |()| {
            let api = api.clone();
            async move { api.recent_toasts().await }
        });

        let api = self.api.clone();
        let weekly = request(weekly, bag, &self.guard, "weekly_links", move |()| {
            let api = api.clone();
            async move { api.weekly_links().await }
        });

        let api = self.api.clone();
        let recommended = request(
            recommended,
            bag,
            &self.guard,
            "recommended_sites",
            move |()| {
                let api = api.clone();
                async move { api.recommended_sites().await }
            },
        );

        HomeOutput {
            summary,
            recent,
            weekly,
            recommended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::subject;
    use std::time::Duration;
    use toaster_api::{Endpoint, MemoryApi};
    use toaster_core::ApiFailure;

    #[tokio::test(start_paused = true)]
    async fn test_appear_loads_all_four_sections() {
        let api = Arc::new(MemoryApi::seeded());
        let mut bag = CancelBag::new();
        let (guard, _expired) = SessionGuard::new();
        let (appear, events) = subject();
        let mut output =
            HomeViewModel::new(api, guard).transform(HomeInput { appear: events }, &mut bag);

        appear.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        let summary = output.summary.drain().pop().unwrap();
        assert!(summary.clips[0].is_all_clips());
        assert_eq!(summary.clips[0].toast_count, summary.all_toast_count);
        assert_eq!(output.recent.drain().pop().unwrap().len(), 4);
        assert_eq!(output.weekly.drain().pop().unwrap().len(), 1);
        assert_eq!(output.recommended.drain().pop().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_section_does_not_block_others() {
        let api = Arc::new(MemoryApi::seeded());
        api.fail(Endpoint::WeeklyLinks, ApiFailure::NetworkFail);
        let mut bag = CancelBag::new();
        let (guard, mut expired) = SessionGuard::new();
        let (appear, events) = subject();
        let mut output =
            HomeViewModel::new(api, guard).transform(HomeInput { appear: events }, &mut bag);

        appear.send(());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(output.weekly.drain().is_empty());
        assert_eq!(output.summary.drain().len(), 1);
        assert!(expired.drain().is_empty());
    }
}
