mod handlers;
mod notice;
mod routings;

pub use crate::routings::router;

use app_config::{AppConfig, AuthKind, StoreKind};
use app_gemini::{Assistant, GeminiClient};
use app_log::init_tracing;
use app_state::AppState;
use app_store::{LaundryStore, MemoryStore, PgStore};
use app_supabase::{AuthProvider, GoTrueClient, MemoryAuth};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc};
use tracing::*;

async fn build_store(config: &AppConfig) -> Arc<dyn LaundryStore> {
    match config.store {
        StoreKind::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreKind::Postgres => {
            let database_url = match env::var("DATABASE_URL") {
                Ok(url) => url,
                Err(e) => {
                    debug!("{}", e);
                    panic!("Cannot locate DATABASE_URL env variable");
                }
            };
            let pg = match PgPoolOptions::new()
                .max_connections(config.pg_connection.try_into().unwrap_or(5))
                .connect(&database_url)
                .await
            {
                Ok(pg) => pg,
                Err(e) => panic!("Cannot connect PostgreSQL\n{}", e),
            };
            let store = PgStore::new(pg);
            if config.pg_migrate {
                if let Err(e) = store.migrate().await {
                    panic!("Cannot apply schema\n{}", e);
                }
            }
            Arc::new(store)
        }
    }
}

fn build_auth(config: &AppConfig) -> Arc<dyn AuthProvider> {
    match config.auth {
        AuthKind::Memory => {
            warn!("Using the in-memory auth provider; accounts are lost on restart");
            Arc::new(MemoryAuth::new(
                config.jwt_secret.clone(),
                config.jwt_audience.clone(),
                config.jwt_access_session_minutes,
            ))
        }
        AuthKind::Supabase => match GoTrueClient::new(config) {
            Ok(client) => Arc::new(client),
            Err(e) => panic!("Cannot build auth client\n{}", e),
        },
    }
}

fn build_assistant(config: &AppConfig) -> Arc<dyn Assistant> {
    match GeminiClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => panic!("Cannot build chat client\n{}", e),
    }
}

pub async fn web_service() {
    dotenv().ok();
    let config = AppConfig::new();
    let bind = config.backend_bind.clone();
    init_tracing(config.log_level);
    // Collaborators
    let store = build_store(&config).await;
    let auth = build_auth(&config);
    let assistant = build_assistant(&config);
    // Generating AppState
    let app_state = Arc::new(AppState {
        config,
        store,
        auth,
        assistant,
    });
    // Loading Routes
    let routes = router(app_state);
    // Setup TCP Port
    let tcp_listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => panic!("Cannot bind {}\n{}", &bind, e),
    };
    // Running Server ...
    info!("Serving web server on {}", &bind);
    if let Err(e) = axum::serve(tcp_listener, routes).await {
        error!("Server stopped: {}", e);
    }
}
