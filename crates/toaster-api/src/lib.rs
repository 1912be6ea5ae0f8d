//! toaster-api - Backend and platform adapters for Toaster
//!
//! Concrete implementations of the collaborator traits declared in
//! `toaster-core`:
//! - [`MemoryApi`] - in-memory [`toaster_core::ToasterApi`] with call
//!   recording, latency and fault injection
//! - [`FileCredentialStore`], [`MemoryCredentialStore`] - session tokens
//! - [`SystemPasteboard`], [`MemoryPasteboard`] - read-and-clear URL sources

pub mod credentials;
pub mod memory;
pub mod pasteboard;

pub use credentials::{FileCredentialStore, MemoryCredentialStore};
pub use memory::{Call, Endpoint, MemoryApi};
pub use pasteboard::MemoryPasteboard;
#[cfg(feature = "system-pasteboard")]
pub use pasteboard::SystemPasteboard;
