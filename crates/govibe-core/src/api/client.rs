//! Typed client for the GoVibe backend.
//!
//! One client holds the single configured base URL; every endpoint the
//! screens call is a method here. Write operations return `Result` so the
//! caller always learns whether the backend accepted the request.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{
    ChallengeParticipation, ExerciseRecord, LoginRequest, OtpRequest, Participant,
    PasswordResetRequest, ProfileUpdate, SignupRequest, UserId, UserProfile, VerifyOtpRequest,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        url::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn user_url(&self, key: &str) -> String {
        self.url(&format!("user/{}", urlencoding::encode(key)))
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// `POST /auth/signup`
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.post_json("auth/signup", request).await.map(drop)
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.post_json("auth/login", request).await.map(drop)
    }

    /// `POST /auth/generate-email`: asks the backend to mail a one-time code.
    pub async fn send_verification_code(&self, email: &str) -> Result<(), ApiError> {
        let body = OtpRequest {
            email: email.to_string(),
        };
        self.post_json("auth/generate-email", &body).await.map(drop)
    }

    /// `POST /auth/verify-email`. Only `201 Created` counts as a verified code.
    pub async fn verify_code(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        let body = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        let resp = self
            .http
            .post(self.url("auth/verify-email"))
            .json(&body)
            .send()
            .await?;
        if resp.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(status_error(resp).await)
        }
    }

    /// `POST /auth/forgot-password`
    pub async fn reset_password(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let body = PasswordResetRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json("auth/forgot-password", &body).await.map(drop)
    }

    // ── Users ────────────────────────────────────────────────────────

    /// `GET /user/{email}` decoded into a profile.
    pub async fn fetch_user(&self, email: &str) -> Result<UserProfile, ApiError> {
        let resp = self.http.get(self.user_url(email)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::UserNotFound {
                email: email.to_string(),
            });
        }
        let resp = check_response(resp).await?;
        resp.json::<UserProfile>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Resolve the backend identifier for `email`.
    ///
    /// Every failure (transport, status, body shape) collapses to `None`;
    /// callers treat a missing identifier as an ordinary outcome.
    pub async fn resolve_user_id(&self, email: &str) -> Option<UserId> {
        match self.lookup_id(email).await {
            Ok(id) => {
                debug!(%email, %id, "resolved user id");
                Some(id)
            }
            Err(err) => {
                warn!(%email, error = %err, "user id lookup failed");
                None
            }
        }
    }

    async fn lookup_id(&self, email: &str) -> Result<UserId, ApiError> {
        let resp = self.http.get(self.user_url(email)).send().await?;
        let resp = check_response(resp).await?;
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        extract_id(&body)
    }

    /// `PUT /user/{key}` where `key` is the user id or the current email.
    pub async fn update_profile(&self, key: &str, update: &ProfileUpdate) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.user_url(key))
            .json(update)
            .send()
            .await?;
        check_response(resp).await.map(drop)
    }

    /// `DELETE /user/{id}`
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let resp = self.http.delete(self.user_url(id.as_str())).send().await?;
        check_response(resp).await.map(drop)
    }

    /// Resolve the id for `email`, then delete that user.
    pub async fn delete_account(&self, email: &str) -> Result<UserId, ApiError> {
        let id = self
            .resolve_user_id(email)
            .await
            .ok_or_else(|| ApiError::UserNotFound {
                email: email.to_string(),
            })?;
        self.delete_user(&id).await?;
        Ok(id)
    }

    // ── Exercises & challenges ───────────────────────────────────────

    /// `POST /exercices`
    pub async fn log_exercise(&self, record: &ExerciseRecord) -> Result<(), ApiError> {
        self.post_json("exercices", record).await.map(drop)
    }

    /// `POST /challenge-participations`
    pub async fn join_challenge(&self, entry: &ChallengeParticipation) -> Result<(), ApiError> {
        self.post_json("challenge-participations", entry)
            .await
            .map(drop)
    }

    /// `GET /challenge-participations`, in backend order.
    pub async fn participants(&self) -> Result<Vec<Participant>, ApiError> {
        let resp = self
            .http
            .get(self.url("challenge-participations"))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        resp.json::<Vec<Participant>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self.http.post(&url).json(body).send().await?;
        check_response(resp).await
    }
}

/// Pull the `_id` string out of a user object.
fn extract_id(body: &serde_json::Value) -> Result<UserId, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::Decode("expected a JSON object".into()))?
        .get("_id")
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
        .map(UserId::new)
        .ok_or_else(|| ApiError::Decode("missing '_id' field".into()))
}

async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(status_error(resp).await)
    }
}

async fn status_error(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    ApiError::Status { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn urls_share_one_base() {
        let client = ApiClient::new("https://api.govibe.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/exercices"), "https://api.govibe.test/exercices");
        assert_eq!(
            client.user_url("jane+fit@example.com"),
            "https://api.govibe.test/user/jane%2Bfit%40example.com"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn extract_id_requires_string_field() {
        assert_eq!(
            extract_id(&json!({"_id": "abc123"})).unwrap(),
            UserId::new("abc123")
        );
        assert!(extract_id(&json!({"id": "abc123"})).is_err());
        assert!(extract_id(&json!({"_id": 42})).is_err());
        assert!(extract_id(&json!({"_id": ""})).is_err());
        assert!(extract_id(&json!(["abc123"])).is_err());
    }
}
