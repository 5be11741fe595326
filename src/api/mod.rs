//! Client wrappers for the user-administration REST API. One method per
//! endpoint; each attaches the bearer token and CSRF header it needs and
//! returns an [`ApiResponse`]. Nothing here retries, refreshes tokens or
//! interprets the status code: callers check `ok()` and decide.

pub mod response;
pub mod types;

use crate::{error::AppError, session::csrf, session::SessionStore, APP_USER_AGENT};
use reqwest::{header, Client, Method};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

pub use response::{ApiResponse, FailureKind};
pub use types::{LoginRequest, NewUser, RegisterRequest, User, UserList, UserUpdate};

/// Default request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CsrfPolicy {
    Skip,
    Attach,
    /// Fresh nonce for a new login.
    Rotate,
}

/// Validates and normalizes the API base URL.
///
/// # Errors
/// Returns `AppError::Config` if the URL does not parse, has no host, or is not http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is not configured.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {scheme}"
            )))
        }
    }

    if url.host().is_none() {
        return Err(AppError::Config(
            "API base URL has no host specified.".to_string(),
        ));
    }

    Ok(url)
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    store: SessionStore,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, store: SessionStore, timeout: Duration) -> Result<Self, AppError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// `POST /users/login`. Rotates the CSRF nonce before sending.
    pub async fn login(&self, request: &LoginRequest) -> ApiResponse {
        self.send(
            Method::POST,
            &["users", "login"],
            Auth::Anonymous,
            CsrfPolicy::Rotate,
            Some(request),
        )
        .await
    }

    /// `POST /users/register`.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse {
        self.send(
            Method::POST,
            &["users", "register"],
            Auth::Anonymous,
            CsrfPolicy::Skip,
            Some(request),
        )
        .await
    }

    /// `GET /users`.
    pub async fn list_users(&self) -> ApiResponse {
        self.send::<()>(Method::GET, &["users"], Auth::Bearer, CsrfPolicy::Attach, None)
            .await
    }

    /// `POST /users`.
    pub async fn create_user(&self, request: &NewUser) -> ApiResponse {
        self.send(
            Method::POST,
            &["users"],
            Auth::Bearer,
            CsrfPolicy::Attach,
            Some(request),
        )
        .await
    }

    /// `PATCH /users/:id`.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResponse {
        self.send(
            Method::PATCH,
            &["users", id],
            Auth::Bearer,
            CsrfPolicy::Attach,
            Some(update),
        )
        .await
    }

    /// `DELETE /users/:id`.
    pub async fn delete_user(&self, id: &str) -> ApiResponse {
        self.send::<()>(
            Method::DELETE,
            &["users", id],
            Auth::Bearer,
            CsrfPolicy::Attach,
            None,
        )
        .await
    }

    fn endpoint(&self, segments: &[&str]) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(segments);
        Some(url)
    }

    fn csrf_header(&self, policy: CsrfPolicy) -> Option<String> {
        let token = match policy {
            CsrfPolicy::Skip => return None,
            CsrfPolicy::Attach => self.store.csrf_token(),
            CsrfPolicy::Rotate => self.store.rotate_csrf_token(),
        };
        token
            .map_err(|err| warn!("sending without CSRF token: {err}"))
            .ok()
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
        csrf_policy: CsrfPolicy,
        body: Option<&B>,
    ) -> ApiResponse {
        let Some(url) = self.endpoint(segments) else {
            warn!("cannot build endpoint URL from {}", self.base_url);
            return ApiResponse::synthesized(FailureKind::UnknownError);
        };

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json");

        if auth == Auth::Bearer {
            let Some(session) = self.store.get_session() else {
                debug!("no stored session for {method} {}", url.path());
                return ApiResponse::synthesized(FailureKind::NotAuthenticated);
            };
            builder = builder.bearer_auth(session.token());
        }

        if let Some(token) = self.csrf_header(csrf_policy) {
            builder = builder.header(csrf::CSRF_HEADER, token);
        }

        if let Some(body) = body {
            match serde_json::to_vec(body) {
                Ok(payload) => builder = builder.body(payload),
                Err(err) => {
                    warn!("failed to encode request body: {err}");
                    return ApiResponse::synthesized(FailureKind::UnknownError);
                }
            }
        }

        let span = info_span!("api.request", http.method = %method, path = %url.path());
        async move {
            let response = match builder.send().await {
                Ok(response) => response,
                Err(err) => {
                    let kind = FailureKind::classify(&err);
                    warn!(kind = %kind, "request failed: {err}");
                    return ApiResponse::synthesized(kind);
                }
            };

            let status = response.status().as_u16();
            debug!(status, "response received");

            if let Some(value) = response
                .headers()
                .get(csrf::CSRF_HEADER)
                .and_then(|value| value.to_str().ok())
            {
                if let Err(err) = self.store.adopt_csrf_token(value) {
                    warn!("failed to store server CSRF token: {err}");
                }
            }

            match response.text().await {
                Ok(body) => ApiResponse::from_parts(status, body),
                Err(err) => {
                    let kind = FailureKind::classify(&err);
                    warn!(kind = %kind, "failed to read response body: {err}");
                    ApiResponse::synthesized(kind)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::Session;
    use serde_json::json;
    use std::net::TcpListener;
    use tempfile::{tempdir, TempDir};
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client(base: &str) -> (ApiClient, TempDir) {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path());
        (ApiClient::new(base, store, DEFAULT_TIMEOUT).unwrap(), dir)
    }

    fn sign_in(client: &ApiClient, permissions: &[&str]) {
        let session: Session = serde_json::from_value(json!({
            "token": "bearer-123",
            "user": {
                "id": "1",
                "name": "Root",
                "email": "root@example.com",
                "role": "admin",
                "permission": permissions,
            }
        }))
        .unwrap();
        client.store().set_session(&session).unwrap();
    }

    #[test]
    fn parse_base_url_validates_scheme_and_host() {
        assert_eq!(
            parse_base_url(" https://api.example.com/ ").unwrap().as_str(),
            "https://api.example.com/"
        );
        assert!(matches!(parse_base_url(""), Err(AppError::Config(_))));
        assert!(matches!(
            parse_base_url("ftp://api.example.com"),
            Err(AppError::Config(message)) if message.contains("ftp")
        ));
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_ids() {
        let (client, _dir) = client("https://api.example.com/v1/");
        let url = client.endpoint(&["users", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/users/a%2Fb%20c");
    }

    #[tokio::test]
    async fn login_posts_credentials_with_fresh_csrf_token() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .and(header("content-type", "application/json"))
            .and(header_exists("x-csrf-token"))
            .and(body_json(json!({"email": "a@x.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        let before = client.store().csrf_token().unwrap();
        let response = client
            .login(&LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw".to_string(),
            })
            .await;

        assert!(response.ok());
        assert_ne!(client.store().csrf_token().unwrap(), before);
    }

    #[tokio::test]
    async fn list_users_sends_bearer_token() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(header("authorization", "Bearer bearer-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        sign_in(&client, &[]);

        let response = client.list_users().await;
        assert!(response.ok());
        let users: UserList = response.json().unwrap();
        assert!(users.into_users().is_empty());
    }

    #[tokio::test]
    async fn bearer_call_without_session_sends_nothing() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        let response = client.delete_user("5").await;

        assert!(!response.ok());
        assert_eq!(response.failure(), Some(FailureKind::NotAuthenticated));
    }

    #[tokio::test]
    async fn update_and_delete_hit_user_paths() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/5"))
            .and(body_json(json!({"name": "N", "email": "n@x.com", "role": "user"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "5"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users/5"))
            .and(header_exists("x-csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        sign_in(&client, &["edit_user", "delete_user"]);

        let update = UserUpdate {
            name: "N".to_string(),
            email: "n@x.com".to_string(),
            role: "user".to_string(),
        };
        assert!(client.update_user("5", &update).await.ok());
        assert!(client.delete_user("5").await.ok());
    }

    #[tokio::test]
    async fn register_sends_no_auth_headers() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/register"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "taken"})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        let response = client
            .register(&RegisterRequest {
                name: "N".to_string(),
                email: "n@x.com".to_string(),
                password: "pw".to_string(),
            })
            .await;

        assert!(!response.ok());
        assert_eq!(response.status(), 409);
        assert_eq!(response.message("Failed to register"), "taken");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].headers.get("x-csrf-token").is_none());
    }

    #[tokio::test]
    async fn server_issued_csrf_token_is_adopted() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-CSRF-Token", "from-server")
                    .set_body_json(json!({"data": []})),
            )
            .mount(&server)
            .await;

        let (client, _dir) = client(&server.uri());
        sign_in(&client, &[]);
        client.list_users().await;

        assert_eq!(client.store().csrf_token().unwrap(), "from-server");
    }

    #[tokio::test]
    async fn unreachable_server_yields_synthesized_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (client, _dir) = client(&format!("http://{addr}"));
        sign_in(&client, &[]);

        for response in [
            client.list_users().await,
            client
                .login(&LoginRequest {
                    email: "a@x.com".to_string(),
                    password: "pw".to_string(),
                })
                .await,
        ] {
            assert!(!response.ok());
            assert_eq!(response.status(), response::SYNTHETIC_STATUS);
            assert!(response.failure().is_some());
            assert!(!response.message("").is_empty());
        }
    }
}
