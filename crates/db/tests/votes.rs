//! Integration tests for the work -> vote association and vote casting.

use assert_matches::assert_matches;
use ranker_db::error::SaveError;
use ranker_db::models::user::CreateUser;
use ranker_db::repositories::vote_repo::{ALREADY_VOTED, MUST_EXIST};
use ranker_db::repositories::{UserRepo, VoteRepo, WorkRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works", "votes"))]
async fn test_work_has_many_votes(pool: PgPool) {
    let votes = VoteRepo::list_by_work(&pool, 2).await.unwrap();

    assert_eq!(votes.len(), 3);
    assert!(votes.iter().all(|v| v.work_id == 2));
    assert_eq!(VoteRepo::count_by_work(&pool, 2).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works"))]
async fn test_cast_vote(pool: PgPool) {
    let vote = VoteRepo::cast(&pool, 1, 2).await.unwrap();
    assert_eq!(vote.work_id, 1);
    assert_eq!(vote.user_id, 2);

    let ranked = WorkRepo::find_ranked_by_id(&pool, 1).await.unwrap().unwrap();
    assert_eq!(ranked.vote_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works", "votes"))]
async fn test_second_vote_for_same_work_rejected(pool: PgPool) {
    let result = VoteRepo::cast(&pool, 2, 1).await;
    assert_matches!(result, Err(SaveError::Invalid(errors)) => {
        assert!(errors.has_message("user_id", ALREADY_VOTED));
    });
    assert_eq!(VoteRepo::count_by_work(&pool, 2).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works"))]
async fn test_vote_by_unknown_user_rejected(pool: PgPool) {
    let result = VoteRepo::cast(&pool, 1, 999_999).await;
    assert_matches!(result, Err(SaveError::Invalid(errors)) if errors.has_message("user_id", MUST_EXIST));
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users"))]
async fn test_vote_for_unknown_work_rejected(pool: PgPool) {
    let result = VoteRepo::cast(&pool, 999_999, 1).await;
    assert_matches!(result, Err(SaveError::Invalid(errors)) if errors.has_message("work_id", MUST_EXIST));
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works", "votes"))]
async fn test_list_votes_by_user(pool: PgPool) {
    let votes = VoteRepo::list_by_user(&pool, 1).await.unwrap();
    let work_ids: Vec<i64> = votes.iter().map(|v| v.work_id).collect();
    assert_eq!(work_ids, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works", "votes"))]
async fn test_deleting_work_cascades_votes(pool: PgPool) {
    assert!(WorkRepo::delete(&pool, 2).await.unwrap());

    assert_eq!(VoteRepo::count_by_work(&pool, 2).await.unwrap(), 0);
    assert_eq!(VoteRepo::list_by_user(&pool, 3).await.unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("users", "works", "votes"))]
async fn test_delete_all_removes_every_work(pool: PgPool) {
    let removed = WorkRepo::delete_all(&pool).await.unwrap();
    assert_eq!(removed, 3);
    assert_eq!(WorkRepo::count(&pool).await.unwrap(), 0);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("users"))]
async fn test_duplicate_username_rejected(pool: PgPool) {
    let result = UserRepo::create(
        &pool,
        &CreateUser {
            username: Some("user1".to_string()),
        },
    )
    .await;
    assert_matches!(result, Err(SaveError::Invalid(errors)) if errors.has_message("username", "has already been taken"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_username_rejected(pool: PgPool) {
    let result = UserRepo::create(
        &pool,
        &CreateUser {
            username: Some("   ".to_string()),
        },
    )
    .await;
    assert_matches!(result, Err(SaveError::Invalid(errors)) if errors.has_message("username", "can't be blank"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_trims_username(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: Some("  dee ".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.username, "dee");
    assert_eq!(
        UserRepo::find_by_username(&pool, "dee").await.unwrap().map(|u| u.id),
        Some(user.id)
    );
}
