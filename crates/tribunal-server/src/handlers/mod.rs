//! Request handlers, one module per resource.

pub mod auth;
pub mod causes;
pub mod health;
pub mod records;
pub mod search;
pub mod warrants;
