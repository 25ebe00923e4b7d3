//! Route definitions for the `/works` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{vote, work};
use crate::state::AppState;

/// Routes mounted at `/works`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /winner              -> winner
/// GET    /top                 -> top_ten
/// GET    /top-by-category     -> top_by_category
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/votes          -> vote::list_by_work
/// POST   /{id}/votes          -> vote::cast
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work::list).post(work::create))
        .route("/winner", get(work::winner))
        .route("/top", get(work::top_ten))
        .route("/top-by-category", get(work::top_by_category))
        .route(
            "/{id}",
            get(work::get_by_id).put(work::update).delete(work::delete),
        )
        .route("/{id}/votes", get(vote::list_by_work).post(vote::cast))
}
