//! Request middleware.

pub mod policy;

pub use policy::{ROUTE_POLICY, action_for, require_policy};
