//! Role resolution and login reconciliation.
//!
//! Both functions are pure: the login service feeds them the provider's
//! view of the user and writes whatever [`reconcile`] returns.

use tribunal_core::models::role::Role;
use tribunal_core::models::user::{UpsertUser, User};

use crate::config::RoleMapping;
use crate::discord::Identity;

/// How provider state merges with an already stored user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The provider decides role, display name and avatar on every login.
    #[default]
    ProviderAuthoritative,
    /// As above, but a stored `admin` role survives the login.
    PreserveAdmin,
}

/// Map guild role memberships onto a single portal role.
///
/// Judge beats prosecutor beats civilian. An id listed in
/// `admin_overrides` is always `admin`.
pub fn resolve(memberships: &[String], mapping: &RoleMapping, external_id: &str) -> Role {
    if mapping.admin_overrides.iter().any(|id| id == external_id) {
        return Role::Admin;
    }
    let holds = |group: &[String]| memberships.iter().any(|m| group.contains(m));
    if holds(&mapping.judge_roles) {
        Role::Judge
    } else if holds(&mapping.prosecutor_roles) {
        Role::Prosecutor
    } else {
        Role::Civilian
    }
}

/// Desired stored state after a login.
pub fn reconcile(
    existing: Option<&User>,
    identity: &Identity,
    resolved: Role,
    policy: MergePolicy,
) -> UpsertUser {
    let role = match (policy, existing) {
        (MergePolicy::PreserveAdmin, Some(user)) if user.role == Role::Admin => Role::Admin,
        _ => resolved,
    };
    UpsertUser {
        discord_id: identity.id.clone(),
        display_name: identity.username.clone(),
        avatar: identity.avatar.clone(),
        role,
    }
}
