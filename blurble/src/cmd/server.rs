use crate::modules::{
    auth::TokenIssuer,
    handlers::{self, auth, quotes, scores},
    leaderboard::LeaderboardAggregator,
    store::{init_schema, PgQuoteStore, PgScoreStore, PgUserStore},
};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use sqlx::{postgres::Postgres, Pool};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let database_url = env::var("DATABASE_URL").with_context(|| {
        let message = "DATABASE_URL environment variable must be set";
        tracing::error!(message);
        format!("{}", message)
    })?;

    let pool: Pool<Postgres> = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .with_context(|| {
            let message = "couldn't create database connection pool. check your database status and value of DATABASE_URL environment variable.";
            tracing::error!(message);
            format!("{}", message)
        })?;

    init_schema(&pool).await.with_context(|| {
        let message = "couldn't create database schema";
        tracing::error!(message);
        format!("{}", message)
    })?;

    let app = create_router(pool, TokenIssuer::from_env());
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 3001");
            3001u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to bind server.");

    Ok(())
}

fn create_router(pool: Pool<Postgres>, issuer: TokenIssuer) -> Router {
    let scores = Arc::new(PgScoreStore::new(pool.clone()));
    let users = Arc::new(PgUserStore::new(pool.clone()));
    let quotes = Arc::new(PgQuoteStore::new(pool.clone()));
    let aggregator = Arc::new(LeaderboardAggregator::new(Arc::clone(&scores)));

    Router::new()
        .route("/api/auth/register", routing::post(auth::register))
        .route("/api/auth/login", routing::post(auth::login))
        .route("/api/quotes/random", routing::get(quotes::random))
        .route("/api/quotes/daily", routing::get(quotes::daily))
        .route("/api/scores", routing::post(scores::submit))
        .route("/api/scores/leaderboard", routing::get(scores::leaderboard))
        .route("/api/scores/my-scores", routing::get(scores::my_scores))
        .route("/api/scores/my-stats", routing::get(scores::my_stats))
        .route("/api/scores/history", routing::get(scores::history))
        .route("/api/health", routing::get(handlers::health))
        .route("/api/readiness", routing::get(handlers::readiness))
        .layer(Extension(scores))
        .layer(Extension(users))
        .layer(Extension(quotes))
        .layer(Extension(aggregator))
        .layer(Extension(issuer))
        .layer(Extension(pool))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("SIGINT signal received, starting graceful shutdown.");
}
