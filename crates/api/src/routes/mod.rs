pub mod artist;
pub mod health;
pub mod track;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /artists                 list, create
/// /artists/{id}            get, update, soft delete
///
/// /users                   list, create
/// /users/{id}              get, update, soft delete
///
/// /tracks                  list, create
/// /tracks/{id}             get, update, soft delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/artists", artist::router())
        .nest("/users", user::router())
        .nest("/tracks", track::router())
}
