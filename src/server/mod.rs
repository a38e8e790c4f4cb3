mod artists;
mod extract;
mod shows;
pub(crate) mod types;
mod venues;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDateTime;
use log::{error, info};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::booking::clock::{Clock, SystemClock};
use crate::data::configuration::Configuration;
use crate::data::dbconnector::{SQLConnector, StoreConnection};

/// Handed to every request. The connection is a pool handle: each unit of
/// work checks a connection out and returns it however the request ends.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        AppState { db, clock }
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route(
            "/venues/{venue_id}",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route(
            "/artists/{artist_id}",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .fallback(not_found)
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "venues": "/venues",
        "artists": "/artists",
        "shows": "/shows",
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    not_found_body()
}

fn not_found_body() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": { "message": "page not found", "status": 404 } })),
    )
}

pub async fn run(config: &Configuration, database_connection: SQLConnector) -> anyhow::Result<()> {
    let state = AppState::new(database_connection.connection()?, Arc::new(SystemClock));
    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Listening on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped, closing database");
    database_connection.close().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
