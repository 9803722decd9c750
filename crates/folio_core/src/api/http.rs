//! `reqwest` implementation of the API traits.
//!
//! # Invariants
//! - Every request carries a fresh `X-Request-Id` that is also logged.
//! - Logs never contain request bodies, tokens or response payloads.

use super::{
    ApiError, ApiResult, AuthApi, BlogApi, ContactApi, LikeApi, PortfolioApi, Registration,
    UserApi,
};
use crate::config::ClientConfig;
use crate::logging::sanitize_message;
use crate::model::account::{PasswordChange, ProfileUpdate};
use crate::model::contact::ContactMessage;
use crate::model::portfolio::{
    Achievement, AchievementDraft, Portfolio, PortfolioUpdate, Project, ProjectDraft, RecordId,
};
use crate::model::post::{Post, PostDraft};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    http: Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    image_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

impl HttpApiClient {
    /// Builds a client for `base_url`.
    ///
    /// # Errors
    /// - `ApiError::Decode` when `base_url` is not an absolute http(s) URL.
    /// - `ApiError::Transport` when the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::Decode(format!("invalid API base URL `{base_url}`")))?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, operation: &'static str, builder: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let started_at = Instant::now();
        debug!(
            "event=api_request module=api status=start operation={operation} request_id={request_id}"
        );

        let response = match builder
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    "event=api_request module=api status=error operation={operation} request_id={request_id} duration_ms={} error_code=transport timeout={}",
                    started_at.elapsed().as_millis(),
                    err.is_timeout()
                );
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(
                "event=api_request module=api status=ok operation={operation} request_id={request_id} http_status={} duration_ms={}",
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Ok(response);
        }

        warn!(
            "event=api_request module=api status=error operation={operation} request_id={request_id} http_status={} duration_ms={} error_code=http_status",
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
        let message = error_message(response).await;
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(operation, builder).await?;
        response.json::<T>().await.map_err(|err| {
            warn!("event=api_decode module=api status=error operation={operation}");
            ApiError::Decode(err.to_string())
        })
    }

    async fn send_empty(&self, operation: &'static str, builder: RequestBuilder) -> ApiResult<()> {
        self.send(operation, builder).await.map(|_| ())
    }
}

/// Extracts a short message from an error response body.
///
/// Accepts `{"error": …}` / `{"message": …}` JSON or plain text.
async fn error_message(response: Response) -> String {
    let Ok(body) = response.text().await else {
        return String::new();
    };
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.error)
        .unwrap_or(body);
    sanitize_message(message.trim(), MAX_ERROR_MESSAGE_CHARS)
}

#[async_trait]
impl AuthApi for HttpApiClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let url = self.endpoint(["api", "login"]);
        let builder = self
            .request(Method::POST, url, None)
            .json(&LoginRequest { username, password });
        let response: LoginResponse = self.send_json("auth.login", builder).await?;
        Ok(response.token)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let url = self.endpoint(["api", "register"]);
        let builder = self.request(Method::POST, url, None).json(registration);
        self.send_empty("auth.register", builder).await
    }
}

#[async_trait]
impl PortfolioApi for HttpApiClient {
    async fn fetch_portfolio(&self, username: &str, token: Option<&str>) -> ApiResult<Portfolio> {
        let url = self.endpoint(["api", "portfolio", username]);
        let builder = self.request(Method::GET, url, token);
        self.send_json("portfolio.get", builder).await
    }

    async fn update_portfolio(
        &self,
        token: &str,
        update: &PortfolioUpdate,
    ) -> ApiResult<Portfolio> {
        let url = self.endpoint(["api", "auth", "portfolio"]);
        let builder = self.request(Method::PUT, url, Some(token)).json(update);
        self.send_json("portfolio.update", builder).await
    }

    async fn create_project(&self, token: &str, draft: &ProjectDraft) -> ApiResult<Project> {
        let url = self.endpoint(["api", "auth", "portfolio", "projects"]);
        let builder = self.request(Method::POST, url, Some(token)).json(draft);
        self.send_json("project.create", builder).await
    }

    async fn update_project(
        &self,
        token: &str,
        id: RecordId,
        draft: &ProjectDraft,
    ) -> ApiResult<Project> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "projects", id.as_str()]);
        let builder = self.request(Method::PUT, url, Some(token)).json(draft);
        self.send_json("project.update", builder).await
    }

    async fn delete_project(&self, token: &str, id: RecordId) -> ApiResult<()> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "projects", id.as_str()]);
        let builder = self.request(Method::DELETE, url, Some(token));
        self.send_empty("project.delete", builder).await
    }

    async fn create_achievement(
        &self,
        token: &str,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement> {
        let url = self.endpoint(["api", "auth", "portfolio", "achievements"]);
        let builder = self.request(Method::POST, url, Some(token)).json(draft);
        self.send_json("achievement.create", builder).await
    }

    async fn update_achievement(
        &self,
        token: &str,
        id: RecordId,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "achievements", id.as_str()]);
        let builder = self.request(Method::PUT, url, Some(token)).json(draft);
        self.send_json("achievement.update", builder).await
    }

    async fn delete_achievement(&self, token: &str, id: RecordId) -> ApiResult<()> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "achievements", id.as_str()]);
        let builder = self.request(Method::DELETE, url, Some(token));
        self.send_empty("achievement.delete", builder).await
    }

    async fn upload_image(
        &self,
        token: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String> {
        let url = self.endpoint(["api", "auth", "upload"]);
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()));
        let builder = self.request(Method::POST, url, Some(token)).multipart(form);
        let response: UploadResponse = self.send_json("image.upload", builder).await?;
        Ok(response.image_url)
    }
}

#[async_trait]
impl LikeApi for HttpApiClient {
    async fn like_project(&self, token: &str, project_id: RecordId) -> ApiResult<()> {
        let id = project_id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "projects", id.as_str(), "like"]);
        let builder = self.request(Method::POST, url, Some(token));
        self.send_empty("project.like", builder).await
    }

    async fn unlike_project(&self, token: &str, project_id: RecordId) -> ApiResult<()> {
        let id = project_id.to_string();
        let url = self.endpoint(["api", "auth", "portfolio", "projects", id.as_str(), "like"]);
        let builder = self.request(Method::DELETE, url, Some(token));
        self.send_empty("project.unlike", builder).await
    }
}

#[async_trait]
impl BlogApi for HttpApiClient {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint(["api", "posts"]);
        let builder = self.request(Method::GET, url, None);
        self.send_json("post.list", builder).await
    }

    async fn get_post(&self, id: RecordId) -> ApiResult<Post> {
        let id = id.to_string();
        let url = self.endpoint(["api", "posts", id.as_str()]);
        let builder = self.request(Method::GET, url, None);
        self.send_json("post.get", builder).await
    }

    async fn create_post(&self, token: &str, draft: &PostDraft) -> ApiResult<Post> {
        let url = self.endpoint(["api", "auth", "posts"]);
        let builder = self.request(Method::POST, url, Some(token)).json(draft);
        self.send_json("post.create", builder).await
    }

    async fn update_post(&self, token: &str, id: RecordId, draft: &PostDraft) -> ApiResult<Post> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "posts", id.as_str()]);
        let builder = self.request(Method::PUT, url, Some(token)).json(draft);
        self.send_json("post.update", builder).await
    }

    async fn delete_post(&self, token: &str, id: RecordId) -> ApiResult<()> {
        let id = id.to_string();
        let url = self.endpoint(["api", "auth", "posts", id.as_str()]);
        let builder = self.request(Method::DELETE, url, Some(token));
        self.send_empty("post.delete", builder).await
    }
}

#[async_trait]
impl ContactApi for HttpApiClient {
    async fn send_contact(&self, message: &ContactMessage) -> ApiResult<()> {
        let url = self.endpoint(["api", "contact"]);
        let builder = self.request(Method::POST, url, None).json(message);
        self.send_empty("contact.send", builder).await
    }
}

#[async_trait]
impl UserApi for HttpApiClient {
    async fn update_user(&self, token: &str, update: &ProfileUpdate) -> ApiResult<()> {
        let url = self.endpoint(["api", "auth", "user"]);
        let builder = self.request(Method::PUT, url, Some(token)).json(update);
        self.send_empty("user.update", builder).await
    }

    async fn change_password(&self, token: &str, change: &PasswordChange) -> ApiResult<()> {
        let url = self.endpoint(["api", "auth", "user", "password"]);
        let builder = self.request(Method::PUT, url, Some(token)).json(change);
        self.send_empty("user.password", builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::HttpApiClient;
    use std::time::Duration;

    fn client(base: &str) -> HttpApiClient {
        HttpApiClient::new(base, Duration::from_secs(1)).expect("client should build")
    }

    #[test]
    fn endpoint_joins_and_encodes_segments() {
        let api = client("https://api.example.com/");
        assert_eq!(
            api.endpoint(["api", "portfolio", "ada lovelace"]).as_str(),
            "https://api.example.com/api/portfolio/ada%20lovelace"
        );
        assert_eq!(
            api.endpoint(["api", "portfolio", "../admin"]).as_str(),
            "https://api.example.com/api/portfolio/..%2Fadmin"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = client("http://localhost:8080/backend");
        assert_eq!(
            api.endpoint(["api", "posts"]).as_str(),
            "http://localhost:8080/backend/api/posts"
        );
        assert_eq!(api.base_url(), "http://localhost:8080/backend");
    }

    #[test]
    fn new_rejects_non_http_base() {
        assert!(HttpApiClient::new("ftp://example.com", Duration::from_secs(1)).is_err());
        assert!(HttpApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
