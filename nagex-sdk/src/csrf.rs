//! CSRF token sourcing.
//!
//! Mutating endpoints expect the anti-forgery token the page embeds in a
//! hidden form field. The token rotates with the session, so sources
//! must produce the current value on every call rather than caching one.

use std::path::PathBuf;

/// Provides the current anti-forgery token for mutating requests.
///
/// Implementations are queried once per request.
pub trait CsrfTokenSource: Send + Sync {
    /// The token to attach, or `None` when no token is available.
    fn token(&self) -> Option<String>;
}

/// A fixed token, for tests and short-lived scripts.
#[derive(Debug, Clone)]
pub struct FixedToken(String);

impl FixedToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CsrfTokenSource for FixedToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// A source with no token at all.
///
/// Read-only consumers can use this; mutating calls will fail with a
/// missing-token error instead of sending an empty field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl CsrfTokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Reads the token from a file on every call.
///
/// The file holds the current hidden-field value and is rewritten by
/// whatever owns the session; re-reading per request keeps rotated
/// tokens fresh.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CsrfTokenSource for TokenFile {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nagex-csrf-{}-{}", std::process::id(), name))
    }

    #[test]
    fn token_file_is_reread_on_every_call() {
        let path = temp_path("reread");
        std::fs::write(&path, "token-one\n").unwrap();
        let source = TokenFile::new(&path);
        assert_eq!(source.token().as_deref(), Some("token-one"));

        std::fs::write(&path, "token-two\n").unwrap();
        assert_eq!(source.token().as_deref(), Some("token-two"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(source.token(), None);
    }

    #[test]
    fn empty_token_file_yields_none() {
        let path = temp_path("empty");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(TokenFile::new(&path).token(), None);
        std::fs::remove_file(&path).unwrap();
    }
}
