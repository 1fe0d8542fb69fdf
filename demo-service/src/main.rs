//! Minimal service showing the authentication wiring: a login endpoint,
//! one protected route, and an in-memory user store standing in for a
//! real database.

use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::routing::get;
use axum::Json;
use axum::Router;
use jwt_axum::AuthConfig;
use jwt_axum::CurrentIdentity;
use jwt_axum::Identity;
use jwt_axum::IdentityStore;
use jwt_axum::JwtAuth;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone)]
struct User {
    id: u64,
    username: String,
}

impl Identity for User {
    fn id(&self) -> serde_json::Value {
        serde_json::json!(self.id)
    }
}

/// In-memory user store. A real service would back this with a database
/// and hashed passwords.
struct MemoryStore {
    users: HashMap<String, (String, User)>,
}

impl MemoryStore {
    fn seeded() -> Self {
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
        Self { users }
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
        Ok(self
            .users
            .values()
            .find(|(_, user)| serde_json::json!(user.id) == *subject)
            .map(|(_, user)| user.clone()))
    }
}

async fn whoami(CurrentIdentity(user): CurrentIdentity<User>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
    }))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo_service=debug,jwt_axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::load()?;

    tracing::info!(
        scheme = %config.scheme,
        realm = %config.realm,
        auth_path = %config.auth_path,
        lifetime_seconds = config.lifetime_seconds,
        "Configuration loaded"
    );

    let auth = JwtAuth::new(config, MemoryStore::seeded());

    let protected = auth.protect(Router::new().route("/whoami", get(whoami)));
    let app = auth.routes().merge(protected);

    let address = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(%address, "Http server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
