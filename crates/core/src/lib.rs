//! Domain logic for the media ranker.
//!
//! Everything here is free of database and HTTP concerns so it can be unit
//! tested in isolation and shared by the `ranker-db` and `ranker-api` crates.

pub mod error;
pub mod ranking;
pub mod types;
pub mod validation;
pub mod work;
