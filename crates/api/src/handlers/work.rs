//! Handlers for the `/works` resource and the vote rankings.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ranker_core::error::CoreError;
use ranker_core::ranking::RankingQuery;
use ranker_core::types::DbId;
use ranker_core::work::KNOWN_CATEGORIES;
use ranker_db::models::work::{CreateWork, RankedWork, UpdateWork, Work};
use ranker_db::repositories::WorkRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::{CategoryFilter, CategoryParam};
use crate::response::DataResponse;
use crate::state::AppState;

/// One category's entry in the landing page overview.
#[derive(Debug, Serialize)]
pub struct CategoryTopTen {
    pub category: &'static str,
    pub works: Vec<RankedWork>,
}

/// POST /api/v1/works
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWork>,
) -> AppResult<(StatusCode, Json<DataResponse<Work>>)> {
    let work = WorkRepo::create(&state.pool, &input).await?;
    tracing::info!(work_id = work.id, category = %work.category, "Work created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: work })))
}

/// GET /api/v1/works?category=
///
/// Every work ranked by votes, optionally limited to one category. A blank
/// category is the same as no filter.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilter>,
) -> AppResult<Json<DataResponse<Vec<RankedWork>>>> {
    let category = params.category.as_deref().filter(|c| !c.trim().is_empty());
    let ranking = match category {
        Some(category) => RankingQuery::display_by_votes(category),
        None => RankingQuery::all(),
    };
    let works = WorkRepo::rank(&state.pool, &ranking).await?;
    Ok(Json(DataResponse { data: works }))
}

/// GET /api/v1/works/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RankedWork>>> {
    let work = WorkRepo::find_ranked_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: work }))
}

/// PUT /api/v1/works/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWork>,
) -> AppResult<Json<DataResponse<Work>>> {
    let work = WorkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: work }))
}

/// DELETE /api/v1/works/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if WorkRepo::delete(&state.pool, id).await? {
        tracing::info!(work_id = id, "Work deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/works/winner
///
/// The spotlight work. `data` is `null` when there are no works.
pub async fn winner(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<RankedWork>>>> {
    let winner = WorkRepo::winner(&state.pool).await?;
    Ok(Json(DataResponse { data: winner }))
}

/// GET /api/v1/works/top?category=
pub async fn top_ten(
    State(state): State<AppState>,
    Query(params): Query<CategoryParam>,
) -> AppResult<Json<DataResponse<Vec<RankedWork>>>> {
    if params.category.trim().is_empty() {
        return Err(AppError::BadRequest("category must not be blank".into()));
    }
    let works = WorkRepo::top_ten(&state.pool, &params.category).await?;
    Ok(Json(DataResponse { data: works }))
}

/// GET /api/v1/works/top-by-category
///
/// Top ten for each known category, in display order.
pub async fn top_by_category(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryTopTen>>>> {
    let mut overview = Vec::with_capacity(KNOWN_CATEGORIES.len());
    for category in KNOWN_CATEGORIES {
        let works = WorkRepo::top_ten(&state.pool, category).await?;
        overview.push(CategoryTopTen { category, works });
    }
    Ok(Json(DataResponse { data: overview }))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Work", id })
}
