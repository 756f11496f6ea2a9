use crate::models::{
    Credentials, CurrentUser, DashboardTotals, LoginResponse, Peer, PeerId, Role, ServerStatsRaw,
    User,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Typed client for the backend REST API. Owns the base URL and the bearer
/// token; everything else (polling cadence, window bookkeeping) lives in the
/// monitor layer, which treats any `ApiError` as "no sample this tick".
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// POST `/api/users/login`; a successful login stores the bearer token
    /// for every subsequent call.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(credentials)
            .send()
            .await?;
        let login: LoginResponse = Self::decode(response).await?;
        self.set_token(login.access_token).await;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.get_json("/api/users/me").await
    }

    pub async fn dashboard_totals(&self, is_admin: bool) -> Result<DashboardTotals, ApiError> {
        let path = if is_admin {
            "/api/peers/admin_dashboard"
        } else {
            "/api/peers/dashboard"
        };
        self.get_json(path).await
    }

    /// Single peer record, for the peer-detail view.
    pub async fn peer(&self, id: &PeerId) -> Result<Peer, ApiError> {
        self.get_json(&format!("/api/peers/{}", id.0)).await
    }

    pub async fn peers_for_user(&self, user_id: &str) -> Result<Vec<Peer>, ApiError> {
        self.get_json(&format!("/api/peers/users/{user_id}")).await
    }

    pub async fn peers_by_ips(&self, ips: &[String]) -> Result<Vec<Peer>, ApiError> {
        self.post_json("/api/peers/peers/by-ips", ips).await
    }

    pub async fn server_stats(&self) -> Result<ServerStatsRaw, ApiError> {
        self.get_json("/api/stats/server").await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/users").await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get_json("/api/roles").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer(&self) -> Result<String, ApiError> {
        self.token.read().await.clone().ok_or(ApiError::Unauthorized)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // FastAPI-style error body: {"detail": "..."}
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<String>,
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| status.to_string());

        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/api/users/me"), "http://localhost:8000/api/users/me");
    }

    #[tokio::test]
    async fn protected_calls_without_token_fail_before_the_network() {
        let client = ApiClient::new("http://localhost:1");
        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let err = client.peer(&PeerId("p1".to_string())).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[tokio::test]
    async fn token_lifecycle() {
        let client = ApiClient::new("http://localhost:8000");
        assert!(!client.has_token().await);

        client.set_token("abc123").await;
        assert!(client.has_token().await);

        client.clear_token().await;
        assert!(!client.has_token().await);
    }
}
