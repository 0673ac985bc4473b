//! Account credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DirectError;

/// Environment variable holding the client login.
pub const LOGIN_ENV: &str = "YANDEX_DIRECT_LOGIN";
/// Environment variable holding the OAuth token.
pub const TOKEN_ENV: &str = "YANDEX_DIRECT_TOKEN";

/// Client login plus OAuth bearer token.
///
/// Immutable once built. `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    login: String,
    token: String,
}

impl Credentials {
    /// Build credentials from a login and token.
    pub fn new(login: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            token: token.into(),
        }
    }

    /// Read credentials from `YANDEX_DIRECT_LOGIN` and `YANDEX_DIRECT_TOKEN`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either variable is missing or empty.
    pub fn from_env() -> Result<Self, DirectError> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| DirectError::InvalidArg(format!("{key} is not set")))
        };
        Ok(Self::new(read(LOGIN_ENV)?, read(TOKEN_ENV)?))
    }

    /// Client login sent in the `Client-Login` header.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token with everything but the last four characters masked.
    ///
    /// Tokens of eight characters or fewer are masked entirely.
    #[must_use]
    pub fn redacted_token(&self) -> String {
        let n = self.token.chars().count();
        if n <= 8 {
            return "***".to_string();
        }
        let tail: String = self.token.chars().skip(n - 4).collect();
        format!("***{tail}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("token", &self.redacted_token())
            .finish()
    }
}
