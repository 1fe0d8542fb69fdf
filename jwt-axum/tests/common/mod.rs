use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use axum::Router;
use jwt_axum::AuthConfig;
use jwt_axum::Claims;
use jwt_axum::CurrentIdentity;
use jwt_axum::Identity;
use jwt_axum::IdentityStore;
use jwt_axum::JwtAuth;

pub const TEST_SECRET: &str = "test_secret_key_at_least_32_bytes!";

/// User record held by the in-memory store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub username: String,
}

impl Identity for User {
    fn id(&self) -> serde_json::Value {
        serde_json::json!(self.id)
    }
}

/// In-memory credential and identity store seeded with joe/pass.
///
/// `forget_on_load` simulates a user deleted after their token was issued.
pub struct MemoryStore {
    users: HashMap<String, (String, User)>,
    forget_on_load: bool,
}

impl MemoryStore {
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "joe".to_string(),
            (
                "pass".to_string(),
                User {
                    id: 1,
                    username: "joe".to_string(),
                },
            ),
        );
        Self {
            users,
            forget_on_load: false,
        }
    }

    pub fn amnesiac() -> Self {
        Self {
            forget_on_load: true,
            ..Self::seeded()
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    type Identity = User;
    type Error = Infallible;

    async fn lookup(&self, username: &str, password: &str) -> Result<Option<User>, Infallible> {
        Ok(self
            .users
            .get(username)
            .filter(|(stored, _)| stored == password)
            .map(|(_, user)| user.clone()))
    }

    async fn load(&self, subject: &serde_json::Value) -> Result<Option<User>, Infallible> {
        if self.forget_on_load {
            return Ok(None);
        }

        Ok(self
            .users
            .values()
            .find(|(_, user)| serde_json::json!(user.id) == *subject)
            .map(|(_, user)| user.clone()))
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig::new(TEST_SECRET)
}

pub fn default_auth() -> JwtAuth<MemoryStore> {
    JwtAuth::new(test_config(), MemoryStore::seeded())
}

async fn protected_route(CurrentIdentity(user): CurrentIdentity<User>) -> String {
    format!("hello {}", user.username)
}

/// Echoes the decoded token payload the guard placed in extensions.
async fn claims_route(Extension(claims): Extension<Claims>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "identity": claims.identity,
        "extra": claims.extra,
    }))
}

/// Test application serving the auth endpoint and one protected route on a
/// random local port.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(default_auth()).await
    }

    pub async fn spawn_with(auth: JwtAuth<MemoryStore>) -> Self {
        let protected = auth.protect(
            Router::new()
                .route("/protected", get(protected_route))
                .route("/claims", get(claims_route)),
        );
        let app = auth.routes().merge(protected);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server crashed");
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }

    pub async fn login(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/auth", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in as joe/pass and return the issued token.
    pub async fn joe_token(&self) -> String {
        let response = self
            .login(&serde_json::json!({"username": "joe", "password": "pass"}))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn get_protected(&self, authorization: Option<&str>) -> reqwest::Response {
        self.get("/protected", authorization).await
    }

    pub async fn get(&self, path: &str, authorization: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(format!("{}{}", self.address, path));
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }
        request.send().await.expect("Failed to execute request")
    }
}

/// Assert the default error shape: matching HTTP status plus
/// `{"status_code", "error", "description"}` in the body.
pub async fn assert_error_response(
    response: reqwest::Response,
    status: u16,
    error: &str,
    description: &str,
) {
    assert_eq!(response.status().as_u16(), status);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], status);
    assert_eq!(body["error"], error);
    assert_eq!(body["description"], description);
}
