//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod user_repo;
pub mod vote_repo;
pub mod work_repo;

pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
pub use work_repo::WorkRepo;
