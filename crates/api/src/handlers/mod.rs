pub mod user;
pub mod vote;
pub mod work;
