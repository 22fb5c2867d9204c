use std::fmt;
use std::sync::{Arc, RwLock};

/// Process-wide auth context shared by every authenticated request.
///
/// Cloning is cheap; all clones observe the same sign-in state. The token is
/// only read by the client, never refreshed.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token).filter(|t| !t.trim().is_empty());
    }

    pub fn sign_out(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let other = session.clone();
        assert!(!other.is_signed_in());

        session.sign_in("abc");
        assert_eq!(other.token().as_deref(), Some("abc"));

        other.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_blank_token_is_signed_out() {
        assert!(!Session::with_token("  ").is_signed_in());
    }

    #[test]
    fn test_debug_hides_token() {
        let dbg = format!("{:?}", Session::with_token("secret"));
        assert!(!dbg.contains("secret"));
    }
}
