pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod omdb;
pub mod routes;
pub mod store;
pub mod viewmodel;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{omdb::OmdbClient, store::MovieStore};

pub struct AppState {
    pub store: Arc<dyn MovieStore>,
    pub omdb: Arc<OmdbClient>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/movies", get(routes::list_movies))
        .route("/getMovie/{title}", get(routes::get_movie))
        .route("/addMovie", post(routes::add_movie))
        .route("/updateMovie/{title}", put(routes::update_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
