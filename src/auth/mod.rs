pub mod csrf;
pub mod middleware;
pub mod password;
pub mod session;
pub mod tokens;
pub mod validate;

use std::fmt;

use crate::content::ContentMode;
use crate::forms::EditSessions;
use self::tokens::TokenStore;

#[derive(Debug)]
pub enum AuthError {
    Disabled,
    InvalidCredentials,
    Hash(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Disabled => write!(f, "Login is disabled in static mode."),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Checks admin credentials and issues bearer tokens.
///
/// With static content there is nothing to edit, so login always fails and
/// no token ever verifies.
#[derive(Clone)]
pub struct Authenticator {
    mode: ContentMode,
    username: String,
    password_hash: String,
    tokens: TokenStore,
}

impl Authenticator {
    pub fn new(mode: ContentMode, username: &str, password_hash: &str, tokens: TokenStore) -> Self {
        Self {
            mode,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            tokens,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mode == ContentMode::Editable
    }

    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !self.is_enabled() {
            return Err(AuthError::Disabled);
        }
        if username.trim() != self.username {
            return Err(AuthError::InvalidCredentials);
        }
        if !password::verify_password(password, &self.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        log::info!("Admin '{}' signed in", self.username);
        Ok(self.tokens.issue())
    }

    pub fn verify(&self, token: &str) -> bool {
        self.is_enabled() && self.tokens.verify(token)
    }

    pub fn logout(&self, token: &str) {
        self.tokens.revoke(token);
    }

    /// Drop the edit sessions of tokens that no longer verify.
    pub fn sweep(&self, edits: &EditSessions) {
        let dropped = edits.retain(|key| self.verify(key));
        if dropped > 0 {
            log::info!("Dropped {dropped} edit session(s) left by expired tokens");
        }
    }
}
