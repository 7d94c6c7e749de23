//! Declarative authorization policy: `{action → allowed roles}`.
//!
//! This table is the only place that decides who may do what. The HTTP
//! layer maps each protected route to an [`Action`] and checks it here once
//! per request; workflow services consult the same table for their
//! role-gated operations. `admin` is allowed everything.

use crate::error::{TribunalError, TribunalResult};
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read the current user, log out.
    ViewSelf,
    ReadCauses,
    /// Create, edit, trash, restore, purge causes and attach evidence.
    WriteCauses,
    ReadWarrants,
    RequestWarrant,
    /// Sign or reject a pending warrant, read the pending inbox.
    ResolveWarrant,
    Search,
    ReadRecords,
    /// Create citizens, vehicles, confiscations, citations.
    WriteRecords,
    AppendBackground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowed {
    AnyRole,
    Only(&'static [Role]),
}

pub const POLICY: &[(Action, Allowed)] = &[
    (Action::ViewSelf, Allowed::AnyRole),
    (Action::ReadCauses, Allowed::AnyRole),
    (Action::WriteCauses, Allowed::AnyRole),
    (Action::ReadWarrants, Allowed::AnyRole),
    (
        Action::RequestWarrant,
        Allowed::Only(&[Role::Prosecutor, Role::Judge]),
    ),
    (Action::ResolveWarrant, Allowed::Only(&[Role::Judge])),
    (Action::Search, Allowed::AnyRole),
    (Action::ReadRecords, Allowed::AnyRole),
    (Action::WriteRecords, Allowed::AnyRole),
    (
        Action::AppendBackground,
        Allowed::Only(&[Role::Police, Role::Prosecutor, Role::Judge]),
    ),
];

impl Action {
    pub fn allowed(&self) -> Allowed {
        POLICY
            .iter()
            .find(|(action, _)| action == self)
            .map(|(_, allowed)| *allowed)
            // Unlisted actions are admin-only.
            .unwrap_or(Allowed::Only(&[]))
    }

    pub fn permits(&self, role: Role) -> bool {
        if role == Role::Admin {
            return true;
        }
        match self.allowed() {
            Allowed::AnyRole => true,
            Allowed::Only(roles) => roles.contains(&role),
        }
    }
}

/// Fail with [`TribunalError::Forbidden`] unless `role` may perform `action`.
pub fn authorize(role: Role, action: Action) -> TribunalResult<()> {
    if action.permits(role) {
        Ok(())
    } else {
        Err(TribunalError::forbidden(format!(
            "role '{role}' may not perform {action:?}"
        )))
    }
}
