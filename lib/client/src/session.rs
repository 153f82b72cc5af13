use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by `POST /api/v1/auth/login` and
/// rotated by `POST /api/v1/auth/refresh`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

fn bearer() -> String {
    "Bearer".to_string()
}

/// Shared token cell. The API client reads it per request; the refresh
/// decorator and the login flow write it.
#[derive(Debug, Clone, Default)]
pub struct SessionTokens {
    inner: Arc<RwLock<Option<TokenPair>>>,
}

impl SessionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted tokens (CLI context file).
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        let tokens = Self::new();
        tokens.set(TokenPair {
            access_token: access.into(),
            refresh_token: refresh.into(),
            token_type: bearer(),
            expires_in: 0,
        });
        tokens
    }

    pub fn set(&self, pair: TokenPair) {
        *self.inner.write().unwrap() = Some(pair);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|p| p.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|p| p.refresh_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cell() {
        let tokens = SessionTokens::new();
        assert!(!tokens.is_authenticated());
        assert!(tokens.access_token().is_none());

        tokens.set(TokenPair {
            access_token: "a1".into(),
            refresh_token: "r1".into(),
            token_type: "Bearer".into(),
            expires_in: 3600,
        });
        assert_eq!(tokens.access_token().as_deref(), Some("a1"));
        assert_eq!(tokens.refresh_token().as_deref(), Some("r1"));

        tokens.clear();
        assert!(!tokens.is_authenticated());
    }

    #[test]
    fn test_wire_format() {
        let raw = r#"{"accessToken":"a","refreshToken":"r","tokenType":"Bearer","expiresIn":86400}"#;
        let pair: TokenPair = serde_json::from_str(raw).unwrap();
        assert_eq!(pair.access_token, "a");
        assert_eq!(pair.expires_in, 86400);

        // tokenType/expiresIn are optional on the wire.
        let raw = r#"{"accessToken":"a","refreshToken":"r"}"#;
        let pair: TokenPair = serde_json::from_str(raw).unwrap();
        assert_eq!(pair.token_type, "Bearer");
    }
}
