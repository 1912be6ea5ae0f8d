//! Platform collaborators the navigation core talks to directly

use crate::error::Result;
use crate::models::AuthTokens;

/// Persistent storage for the session tokens
pub trait CredentialStore: Send {
    fn load(&self) -> Result<Option<AuthTokens>>;

    fn save(&mut self, tokens: &AuthTokens) -> Result<()>;

    /// Forget the stored session. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<()>;
}

/// The system pasteboard, as seen by the link-capture shortcut
pub trait Pasteboard: Send {
    /// Read the URL currently on the pasteboard and clear it.
    ///
    /// Returns `None` when the pasteboard holds no URL. The pasteboard is
    /// cleared either way, so a URL is offered at most once.
    fn take_url(&mut self) -> Option<String>;
}

/// `true` when the text looks like a link the service accepts
pub fn is_link(text: &str) -> bool {
    text.starts_with("https://") || text.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_link_accepts_http_and_https() {
        assert!(is_link("https://toaster.example/a"));
        assert!(is_link("http://toaster.example"));
        assert!(!is_link("toaster.example"));
        assert!(!is_link("ftp://toaster.example"));
        assert!(!is_link(""));
    }
}
