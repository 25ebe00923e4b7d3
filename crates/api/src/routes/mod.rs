pub mod health;
pub mod user;
pub mod work;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /works                          list (?category=), create
/// /works/winner                   spotlight work
/// /works/top                      top ten (?category=)
/// /works/top-by-category          top ten for each known category
/// /works/{id}                     get, update, delete
/// /works/{id}/votes               list, cast
///
/// /users                          list, create
/// /users/{id}                     get
/// /users/{id}/votes               votes cast by the user
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/works", work::router())
        .nest("/users", user::router())
}
