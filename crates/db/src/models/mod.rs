//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - Where the entity is editable, an update DTO (all `Option` fields) for patches

pub mod user;
pub mod vote;
pub mod work;
