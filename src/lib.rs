pub mod auth;
pub mod db;
pub mod model;
pub mod store;
pub mod utils;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use model::config::Settings;
use model::data::SessionData;
use tokio::signal;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utils::secret_str::SecretString;

pub mod handler;

// Define a trait for session store
#[async_trait]
pub trait SessionStore {
    async fn add(&self, session_id: &str, data: SessionData) -> Result<(), model::store::Error>;
    async fn get(&self, session_id: &str) -> Result<SessionData, model::store::Error>;
    /// Deletes the session, absent ids are ignored.
    async fn remove(&self, session_id: &str) -> Result<(), model::store::Error>;
    /// Updates `last_activity` only, absent ids are ignored.
    async fn touch(&self, session_id: &str, now: i64) -> Result<(), model::store::Error>;
    /// Drops every session with `expires_at < now`, returns the number removed.
    async fn sweep(&self, now: i64) -> Result<usize, model::store::Error>;
    async fn list(&self) -> Result<Vec<SessionData>, model::store::Error>;

    async fn create(
        &self,
        session_id: &str,
        now: i64,
        duration: i64,
    ) -> Result<SessionData, model::store::Error> {
        let data = SessionData::new(session_id, now, duration);
        self.add(session_id, data.clone()).await?;
        Ok(data)
    }
}

#[async_trait]
pub trait ConfigStore {
    async fn get(&self) -> anyhow::Result<Settings>;
    async fn save(&self, settings: Settings) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AuthService {
    async fn login(&self, pass: &SecretString) -> Result<model::auth::Login, model::auth::Error>;
    async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), model::auth::Error>;
}

/// Source of the current time in unix millis.
pub trait Clock {
    fn now(&self) -> i64;
}

pub fn app(data: Arc<model::service::Data>) -> Router {
    let protected = Router::new()
        .route(
            "/auth/change-password",
            post(handler::change_password::handler),
        )
        .route("/auth/session", get(handler::session::handler))
        .route("/auth/logout", post(handler::logout::handler))
        .route("/auth/sessions", get(handler::sessions::handler))
        .route("/database/info", get(handler::database::handler))
        .route("/tables", get(handler::tables::list))
        .route(
            "/table/:name",
            get(handler::tables::rows).post(handler::tables::insert),
        )
        .route("/table/:name/clear", delete(handler::tables::clear))
        .route(
            "/table/:name/:id",
            put(handler::tables::update).delete(handler::tables::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            data.clone(),
            handler::gate::middleware,
        ));

    Router::new()
        .route("/live", get(handler::live::handler))
        .route("/auth/login", post(handler::login::handler))
        .route("/auth/check", get(handler::check::handler))
        .merge(protected)
        .with_state(data)
}

pub const BODY_LIMIT: usize = 1024 * 1024;

/// `app` wrapped with the http layers the server runs with.
pub fn service(data: Arc<model::service::Data>, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-session-id"),
        ]);

    app(data)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer((
            TraceLayer::new_for_http(),
            TimeoutLayer::new(Duration::from_secs(15)),
            cors,
        ))
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Ctrl-C received, shutting down");
        },
        _ = terminate => {
            log::info!("SIGTERM received, shutting down");
        },
    }
}
