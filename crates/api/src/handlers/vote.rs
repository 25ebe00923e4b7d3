//! Handlers for votes, nested under works and users.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ranker_core::error::CoreError;
use ranker_core::types::DbId;
use ranker_core::validation::{FieldErrors, BLANK};
use ranker_db::models::vote::{CastVote, Vote};
use ranker_db::repositories::{UserRepo, VoteRepo, WorkRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/works/{id}/votes
pub async fn list_by_work(
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    ensure_work_exists(&state, work_id).await?;
    let votes = VoteRepo::list_by_work(&state.pool, work_id).await?;
    Ok(Json(DataResponse { data: votes }))
}

/// POST /api/v1/works/{id}/votes
pub async fn cast(
    State(state): State<AppState>,
    Path(work_id): Path<DbId>,
    Json(input): Json<CastVote>,
) -> AppResult<(StatusCode, Json<DataResponse<Vote>>)> {
    ensure_work_exists(&state, work_id).await?;

    let Some(user_id) = input.user_id else {
        let mut errors = FieldErrors::new();
        errors.add("user_id", BLANK);
        return Err(CoreError::InvalidFields(errors).into());
    };

    let vote = VoteRepo::cast(&state.pool, work_id, user_id).await?;
    tracing::info!(work_id, user_id, vote_id = vote.id, "Vote cast");
    Ok((StatusCode::CREATED, Json(DataResponse { data: vote })))
}

/// GET /api/v1/users/{id}/votes
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Vote>>>> {
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    let votes = VoteRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: votes }))
}

async fn ensure_work_exists(state: &AppState, work_id: DbId) -> AppResult<()> {
    match WorkRepo::find_by_id(&state.pool, work_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Work",
            id: work_id,
        })),
    }
}
