use super::{unhandled, ChildFlows, Coordinator, FlowContext, FlowId, FlowKind, FlowSignal};
use crate::nav::{Banner, Router};
use crate::screens::remind::RemindIntent;
use crate::screens::remind_select_clip::RemindSelectClipIntent;
use crate::screens::remind_timer_add::RemindTimerAddIntent;
use crate::screens::ScreenIntent;

pub const TIMER_SAVED_MESSAGE: &str = "Reminder saved";

/// The reminder tab: the timer board and the add/edit wizard
#[derive(Debug)]
pub struct TimerFlow {
    id: FlowId,
    router: Router,
    children: ChildFlows,
}

impl TimerFlow {
    pub fn new(router: Router) -> Self {
        Self {
            id: super::next_flow_id(),
            router,
            children: ChildFlows::new(),
        }
    }
}

impl Coordinator for TimerFlow {
    fn id(&self) -> FlowId {
        self.id
    }

    fn kind(&self) -> FlowKind {
        FlowKind::Timer
    }

    fn router(&self) -> Router {
        self.router
    }

    fn start(&mut self, cx: &mut FlowContext<'_>) {
        let screen = cx.screens.remind().bound_to(self.id);
        self.router.set_root(cx.host, screen, false);
    }

    fn handle(&mut self, intent: ScreenIntent, cx: &mut FlowContext<'_>) -> FlowSignal {
        match intent {
            ScreenIntent::Remind(RemindIntent::AddTimerSelected) => {
                let screen = cx.screens.remind_select_clip().bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::Remind(RemindIntent::EditTimerSelected(timer)) => {
                let screen = cx
                    .screens
                    .remind_timer_add(timer.clip_id, Some(timer))
                    .bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::RemindSelectClip(RemindSelectClipIntent::ClipChosen(clip_id)) => {
                let screen = cx
                    .screens
                    .remind_timer_add(clip_id, None)
                    .bound_to(self.id);
                self.router.push_hiding_tab_bar(cx.host, screen, true);
            }
            ScreenIntent::RemindTimerAdd(RemindTimerAddIntent::TimerSaved) => {
                self.router.pop_to_root(cx.host, true);
                cx.host
                    .post_banner(self.router.stack(), Banner::success(TIMER_SAVED_MESSAGE));
            }
            ScreenIntent::RemindSelectClip(RemindSelectClipIntent::Back)
            | ScreenIntent::RemindTimerAdd(RemindTimerAddIntent::Back) => {
                self.router.pop(cx.host, true);
            }
            other => return unhandled(self.kind(), self.id, &other),
        }
        FlowSignal::Continue
    }

    fn children(&mut self) -> &mut ChildFlows {
        &mut self.children
    }
}
