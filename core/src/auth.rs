//! HTTP Basic credentials carrying a pre-encoded security token.
//!
//! The gateway reads the token from the username slot and ignores the
//! password, which is always the literal `none`.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Password paired with every token.
pub const PLACEHOLDER_PASSWORD: &str = "none";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    password: String,
}

impl Credentials {
    pub fn from_token(token: &str) -> Self {
        Self {
            token: token.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
        }
    }

    /// Value for the `authorization` header: `Basic base64(token:password)`.
    pub fn authorization_header(&self) -> String {
        let pair = format!("{}:{}", self.token, self.password);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

// Tokens are credentials; keep them out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &mask_token(&self.token))
            .field("password", &self.password)
            .finish()
    }
}

/// Mask a token for logging, keeping a short prefix and suffix.
pub fn mask_token(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
