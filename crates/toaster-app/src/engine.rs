//! Engine - the single owner of navigation state
//!
//! The engine holds the navigation host, the root flow and the message
//! queue. Every change to stacks, screens or flows happens inside
//! [`Engine::process`], one message at a time; view-model pipelines run as
//! tokio tasks and only ever talk back through the queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use toaster_core::prelude::*;
use toaster_core::{Backend, CredentialStore, Pasteboard};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::flow::{
    deliver, AppFlow, Coordinator, DefaultFlowFactory, Delivery, FlowContext, FlowEvent,
    FlowFactory, FlowId,
};
use crate::message::Message;
use crate::nav::{NavigationHost, Router, StackId, StackSnapshot};
use crate::screens::{
    DefaultScreenFactory, Screen, ScreenAction, ScreenFactory, ScreenId, ScreenIntent, ScreenView,
};

/// Consecutive idle yields after which [`Engine::settle`] considers the
/// pipelines quiet
const SETTLE_IDLE_ROUNDS: usize = 16;

/// Everything a flow can reach, kept apart from the root flow so both can
/// be borrowed at once
struct Collaborators {
    host: NavigationHost,
    screens: Box<dyn ScreenFactory>,
    flows: Box<dyn FlowFactory>,
    credentials: Box<dyn CredentialStore>,
    pasteboard: Box<dyn Pasteboard>,
}

impl Collaborators {
    fn cx(&mut self) -> FlowContext<'_> {
        FlowContext {
            host: &mut self.host,
            screens: self.screens.as_ref(),
            flows: self.flows.as_ref(),
            credentials: self.credentials.as_mut(),
            pasteboard: self.pasteboard.as_mut(),
        }
    }
}

pub struct Engine {
    parts: Collaborators,
    root: AppFlow,
    root_stack: StackId,
    settings: Settings,
    msg_tx: mpsc::UnboundedSender<Message>,
    msg_rx: mpsc::UnboundedReceiver<Message>,
    started: bool,
}

impl Engine {
    /// Engine over `api` with the default screen and flow factories
    ///
    /// The session starts signed in when the credential store holds tokens.
    pub fn new<A: Backend>(
        api: Arc<A>,
        credentials: Box<dyn CredentialStore>,
        pasteboard: Box<dyn Pasteboard>,
        settings: Settings,
    ) -> Self {
        let screen_config = settings.screen_config();
        Self::from_parts(
            move |tx| Box::new(DefaultScreenFactory::new(api, tx, screen_config)),
            Box::new(DefaultFlowFactory),
            credentials,
            pasteboard,
            settings,
        )
    }

    /// Engine with custom factories. The screen factory is built from the
    /// engine's message sender.
    pub fn from_parts<F>(
        make_screens: F,
        flows: Box<dyn FlowFactory>,
        credentials: Box<dyn CredentialStore>,
        pasteboard: Box<dyn Pasteboard>,
        settings: Settings,
    ) -> Self
    where
        F: FnOnce(mpsc::UnboundedSender<Message>) -> Box<dyn ScreenFactory>,
    {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let logged_in = match credentials.load() {
            Ok(tokens) => tokens.is_some(),
            Err(e) => {
                warn!("Failed to load credentials, starting signed out: {}", e);
                false
            }
        };

        let mut host = NavigationHost::new();
        let root_stack = host.create_stack();

        Self {
            parts: Collaborators {
                host,
                screens: make_screens(msg_tx.clone()),
                flows,
                credentials,
                pasteboard,
            },
            root: AppFlow::new(Router::new(root_stack), logged_in),
            root_stack,
            settings,
            msg_tx,
            msg_rx,
            started: false,
        }
    }

    /// Start the root flow. Starting twice does nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            "Starting Toaster ({})",
            if self.root.is_logged_in() {
                "signed in"
            } else {
                "signed out"
            }
        );
        self.parts.host.emit(EngineEvent::FlowStarted {
            flow: self.root.id(),
            kind: self.root.kind(),
        });
        let mut cx = self.parts.cx();
        self.root.start(&mut cx);
        self.settle_completions();
    }

    // ─────────────────────────────────────────────────────────
    // Message processing
    // ─────────────────────────────────────────────────────────

    /// Handle one message. Returns `false` once the engine should stop.
    pub fn process(&mut self, message: Message) -> bool {
        trace!("Processing {:?}", message);
        match message {
            Message::ScreenAction { screen, action } => {
                let Some(target) = self.parts.host.screen_mut(screen) else {
                    debug!("Action for released screen {} dropped", screen);
                    return true;
                };
                let owner = target.owner();
                if let Some(intent) = target.act(action) {
                    self.route_intent(screen, owner, intent);
                }
            }
            Message::ScreenUpdate { screen, update } => {
                let Some(target) = self.parts.host.screen_mut(screen) else {
                    trace!("Update for released screen {} dropped", screen);
                    return true;
                };
                let owner = target.owner();
                if let Some(intent) = target.apply(update) {
                    self.route_intent(screen, owner, intent);
                }
            }
            Message::Flow { flow, event } => self.deliver(flow, event),
            Message::SessionExpired { screen } => {
                if self.parts.host.screen(screen).is_none() {
                    trace!("Session expiry from released screen {} ignored", screen);
                } else if self.root.is_logged_in() {
                    self.parts.host.emit(EngineEvent::SessionExpired);
                    let mut cx = self.parts.cx();
                    self.root.session_expired(&mut cx);
                }
            }
            Message::Foreground => {
                if self.settings.behavior.capture_pasteboard {
                    let mut cx = self.parts.cx();
                    self.root.handle_pasteboard(&mut cx);
                }
            }
            Message::Quit => {
                info!("Quit requested");
                return false;
            }
        }
        self.settle_completions();
        true
    }

    fn route_intent(&mut self, screen: ScreenId, owner: Option<FlowId>, intent: ScreenIntent) {
        match owner {
            Some(flow) => self.deliver(flow, FlowEvent::Intent(intent)),
            None => debug!("Unbound screen {} raised {:?}; dropped", screen, intent),
        }
    }

    fn deliver(&mut self, flow: FlowId, event: FlowEvent) {
        let mut cx = self.parts.cx();
        if let Delivery::Missed(event) = deliver(&mut self.root, flow, event, &mut cx) {
            debug!("Flow {} is gone; dropping {:?}", flow, event);
        }
    }

    /// Queue the completions of transitions finished during this step
    fn settle_completions(&mut self) {
        for completion in self.parts.host.take_completions() {
            if self.msg_tx.send(completion).is_err() {
                warn!("Message queue closed; completion dropped");
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Driving the loop
    // ─────────────────────────────────────────────────────────

    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.msg_tx.clone()
    }

    /// Wait for the next queued message
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    /// Feed a user action to a screen
    pub fn act(&mut self, screen: ScreenId, action: ScreenAction) -> bool {
        self.process(Message::ScreenAction { screen, action })
    }

    /// Process queued messages until the pipelines go quiet
    ///
    /// Timers (debounce, backend latency) are not advanced; see
    /// [`Engine::run_for`].
    pub async fn settle(&mut self) {
        let mut idle_rounds = 0;
        while idle_rounds < SETTLE_IDLE_ROUNDS {
            tokio::task::yield_now().await;
            let mut progressed = false;
            while let Ok(message) = self.msg_rx.try_recv() {
                self.process(message);
                progressed = true;
            }
            if progressed {
                idle_rounds = 0;
            } else {
                idle_rounds += 1;
            }
        }
    }

    /// Process messages as they arrive for `duration`, then settle
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            tokio::select! {
                Some(message) = self.msg_rx.recv() => {
                    self.process(message);
                }
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
        self.settle().await;
    }

    /// Process messages until [`Message::Quit`]
    pub async fn run(&mut self) {
        self.start();
        while let Some(message) = self.msg_rx.recv().await {
            if !self.process(message) {
                break;
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────

    pub fn host(&self) -> &NavigationHost {
        &self.parts.host
    }

    pub fn root_stack(&self) -> StackId {
        self.root_stack
    }

    pub fn root_flow(&self) -> &AppFlow {
        &self.root
    }

    pub fn is_logged_in(&self) -> bool {
        self.root.is_logged_in()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The screen the user sees: the top of the root stack, or of the
    /// selected tab when the tab bar is on top
    pub fn visible_screen(&self) -> Option<&Screen> {
        let top = self.parts.host.visible_screen(self.root_stack)?;
        match top.view() {
            ScreenView::TabBar(tabs) => tabs
                .current_stack()
                .and_then(|stack| self.parts.host.visible_screen(stack))
                .or(Some(top)),
            _ => Some(top),
        }
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.parts.host.drain_events()
    }

    /// The whole navigation tree
    pub fn snapshot(&self) -> Option<StackSnapshot> {
        self.parts.host.snapshot(self.root_stack)
    }
}
