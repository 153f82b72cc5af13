use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use openhr_core::{ApiEnvelope, ClientError, ListParams, ListPayload, ModuleGrant, Scope};

use crate::session::{SessionTokens, TokenPair};

/// Fallback shown when the API reports failure without a message.
const GENERIC_FAILURE: &str = "The request could not be completed.";

/// Typed client for the OpenHR REST API.
///
/// Every request carries the current bearer token. A 401 triggers one
/// token refresh and one retry of the original request; a second 401
/// propagates as `Unauthorized`. A 403 propagates as `Forbidden` — the
/// caller surfaces it and stops (the CLI exits, a hosting UI redirects).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: SessionTokens,
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: SessionTokens) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // ── Envelope transport ──────────────────────────────────────────

    /// Send one request through the refresh-and-retry decorator and
    /// decode the envelope. Returns the `data` field, which some
    /// endpoints (DELETE) legitimately omit.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&ListParams>,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ClientError> {
        let mut refreshed = false;
        loop {
            let mut req = self.http.request(method.clone(), self.url(path));
            if let Some(params) = query {
                req = req.query(params);
            }
            if let Some(json) = body {
                req = req.json(json);
            }
            if let Some(token) = self.tokens.access_token() {
                req = req.bearer_auth(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            let status = resp.status();

            if status == StatusCode::UNAUTHORIZED {
                if refreshed {
                    return Err(ClientError::Unauthorized("session expired".into()));
                }
                refreshed = true;
                self.refresh_tokens().await?;
                tracing::debug!(path, "retrying request after token refresh");
                continue;
            }

            if status == StatusCode::FORBIDDEN {
                let message = resp
                    .json::<ApiEnvelope<Value>>()
                    .await
                    .ok()
                    .and_then(|env| env.message)
                    .unwrap_or_else(|| "access denied".to_string());
                return Err(ClientError::Forbidden(message));
            }

            let envelope: ApiEnvelope<Value> = resp
                .json()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            // The success flag is authoritative: a 2xx with success:false
            // is still a failure.
            if !envelope.success || !status.is_success() {
                return Err(ClientError::Api(
                    envelope.message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                ));
            }
            return Ok(envelope.data);
        }
    }

    fn require_data(data: Option<Value>) -> Result<Value, ClientError> {
        data.ok_or_else(|| ClientError::Api("response carried no data".into()))
    }

    /// One refresh at a time. Waiters retry with whatever token the
    /// winning refresh installed.
    async fn refresh_tokens(&self) -> Result<(), ClientError> {
        let _gate = self.refresh_gate.lock().await;

        let Some(refresh) = self.tokens.refresh_token() else {
            return Err(ClientError::Unauthorized("not logged in".into()));
        };

        let resp = self
            .http
            .post(self.url("/api/v1/auth/refresh"))
            .json(&serde_json::json!({ "refreshToken": refresh }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            self.tokens.clear();
            return Err(ClientError::Unauthorized(
                "session expired, log in again".into(),
            ));
        }

        let envelope: ApiEnvelope<TokenPair> = resp
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        match envelope.data {
            Some(pair) if envelope.success => {
                tracing::debug!("access token refreshed");
                self.tokens.set(pair);
                Ok(())
            }
            _ => {
                self.tokens.clear();
                Err(ClientError::Unauthorized(
                    "session expired, log in again".into(),
                ))
            }
        }
    }

    // ── Resource verbs ──────────────────────────────────────────────

    pub async fn get_list(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<ListPayload<Value>, ClientError> {
        let data = self.send(Method::GET, path, Some(params), None).await?;
        serde_json::from_value(Self::require_data(data)?)
            .map_err(|e| ClientError::Network(format!("malformed list payload: {}", e)))
    }

    pub async fn get_one(&self, path: &str) -> Result<Value, ClientError> {
        let data = self.send(Method::GET, path, None, None).await?;
        Self::require_data(data)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let data = self.send(Method::POST, path, None, Some(body)).await?;
        Self::require_data(data)
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        let data = self.send(Method::PUT, path, None, Some(body)).await?;
        Self::require_data(data)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    // ── Auth & session ──────────────────────────────────────────────

    /// `POST /api/v1/auth/login`. Stores the returned token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();

        let envelope: ApiEnvelope<TokenPair> = resp
            .json()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED || !envelope.success || !status.is_success() {
            return Err(ClientError::Unauthorized(
                envelope
                    .message
                    .unwrap_or_else(|| "invalid credentials".to_string()),
            ));
        }

        let pair =
            envelope.data.ok_or_else(|| ClientError::Api("login response carried no tokens".into()))?;
        self.tokens.set(pair.clone());
        Ok(pair)
    }

    /// Drop the local session. Token revocation is the server's concern;
    /// the client only forgets what it holds.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// `GET /api/v1/{scope}/permissions/me` — the current actor's grants.
    pub async fn my_permissions(&self, scope: Scope) -> Result<Vec<ModuleGrant>, ClientError> {
        let path = format!("/api/v1/{}/permissions/me", scope.as_path());
        let data = self.send(Method::GET, &path, None, None).await?;
        serde_json::from_value(Self::require_data(data)?)
            .map_err(|e| ClientError::Network(format!("malformed permission payload: {}", e)))
    }

    /// `GET /health` — plain, unauthenticated, not enveloped.
    pub async fn health(&self) -> Result<(), ClientError> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Api(format!("health check failed ({})", resp.status())))
        }
    }
}
