//! Tribunal Core — domain models, error taxonomy, validation schemas,
//! the role policy table and repository traits shared by every crate.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod validation;

pub use error::{TribunalError, TribunalResult};
pub use models::role::Role;
pub use policy::{Action, authorize};
