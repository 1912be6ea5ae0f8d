//! toaster-app - Navigation and presentation core for Toaster
//!
//! This crate implements the flow tree (coordinators), the navigation host
//! and its routers, the fourteen screens with their reactive view-models,
//! the engine that drives them from one message queue, and configuration
//! loading.

pub mod config;
pub mod engine;
pub mod engine_event;
pub mod flow;
pub mod message;
pub mod nav;
pub mod reactive;
pub mod screens;
pub mod view_model;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use flow::{Coordinator, FlowEvent, FlowId, FlowKind, FlowSignal};
pub use message::Message;
pub use nav::{Banner, BannerKind, NavigationHost, Router, StackId};
pub use screens::{Screen, ScreenAction, ScreenFactory, ScreenId, ScreenIntent, ScreenKind};
pub use view_model::ViewModel;
