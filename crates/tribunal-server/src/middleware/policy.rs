//! Route access policy.
//!
//! [`ROUTE_POLICY`] names the [`Action`] behind every protected route.
//! [`require_policy`] authenticates the session cookie, looks the matched
//! route up in the table and checks the action against the role table in
//! `tribunal_core::policy`. A protected route missing from the table is
//! denied.

use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use tribunal_core::error::TribunalError;
use tribunal_core::policy::{Action, authorize};

use crate::cookie::read_cookie;
use crate::error::ApiResult;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// `(method, route template, action)` for every protected route.
pub const ROUTE_POLICY: &[(&str, &str, Action)] = &[
    // Session
    ("GET", "/api/auth/me", Action::ViewSelf),
    ("POST", "/api/auth/logout", Action::ViewSelf),
    // Causes
    ("GET", "/api/causes", Action::ReadCauses),
    ("POST", "/api/causes", Action::WriteCauses),
    ("GET", "/api/causes/trash", Action::ReadCauses),
    ("GET", "/api/causes/{id}", Action::ReadCauses),
    ("PUT", "/api/causes/{id}", Action::WriteCauses),
    ("DELETE", "/api/causes/{id}", Action::WriteCauses),
    ("POST", "/api/causes/{id}/restore", Action::WriteCauses),
    ("DELETE", "/api/causes/{id}/permanent", Action::WriteCauses),
    ("POST", "/api/causes/{id}/evidence", Action::WriteCauses),
    // Warrants
    ("POST", "/api/warrants", Action::RequestWarrant),
    ("GET", "/api/warrants/pending", Action::ResolveWarrant),
    ("GET", "/api/warrants/cause/{cause_id}", Action::ReadWarrants),
    ("GET", "/api/warrants/{id}", Action::ReadWarrants),
    ("PATCH", "/api/warrants/{id}/sign", Action::ResolveWarrant),
    ("PATCH", "/api/warrants/{id}/reject", Action::ResolveWarrant),
    // Search
    ("GET", "/api/search/{kind}/{query}", Action::Search),
    // Records
    ("GET", "/api/citizens", Action::ReadRecords),
    ("POST", "/api/citizens", Action::WriteRecords),
    ("GET", "/api/citizens/{national_id}", Action::ReadRecords),
    (
        "POST",
        "/api/citizens/{national_id}/background",
        Action::AppendBackground,
    ),
    ("GET", "/api/vehicles", Action::ReadRecords),
    ("POST", "/api/vehicles", Action::WriteRecords),
    ("GET", "/api/vehicles/{plate}", Action::ReadRecords),
    ("POST", "/api/confiscations", Action::WriteRecords),
    ("GET", "/api/confiscations/{cause_id}", Action::ReadRecords),
    ("POST", "/api/citations", Action::WriteRecords),
    ("GET", "/api/citations/{cause_id}", Action::ReadRecords),
];

pub fn action_for(method: &Method, template: &str) -> Option<Action> {
    ROUTE_POLICY
        .iter()
        .find(|(m, path, _)| *m == method.as_str() && *path == template)
        .map(|(_, _, action)| *action)
}

/// Authenticate, then authorize against the route table.
///
/// On success the user is available to handlers as [`CurrentUser`].
pub async fn require_policy(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = read_cookie(req.headers(), &state.auth.config().cookie_name)
        .map(str::to_owned)
        .ok_or(TribunalError::Unauthorized)?;
    let user = state.auth.authenticate(&token).await?;

    let template = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or_default();
    let Some(action) = action_for(req.method(), template) else {
        tracing::warn!(method = %req.method(), route = template, "route has no access policy");
        return Err(TribunalError::forbidden("route is not covered by the access policy").into());
    };
    authorize(user.role, action)?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use tribunal_core::models::role::Role;

    use super::*;

    #[test]
    fn each_route_listed_once() {
        for (i, (method, path, _)) in ROUTE_POLICY.iter().enumerate() {
            assert!(
                ROUTE_POLICY[i + 1..]
                    .iter()
                    .all(|(m, p, _)| (m, p) != (method, path)),
                "{method} {path} listed twice"
            );
        }
    }

    #[test]
    fn lookup_is_by_method_and_template() {
        assert_eq!(
            action_for(&Method::PATCH, "/api/warrants/{id}/sign"),
            Some(Action::ResolveWarrant)
        );
        assert_eq!(
            action_for(&Method::GET, "/api/causes"),
            Some(Action::ReadCauses)
        );
        assert_eq!(action_for(&Method::PATCH, "/api/causes"), None);
        assert_eq!(action_for(&Method::GET, "/api/unknown"), None);
    }

    #[test]
    fn civilians_cannot_reach_judge_routes() {
        let action = action_for(&Method::GET, "/api/warrants/pending").unwrap();
        assert!(!action.permits(Role::Civilian));
        assert!(action.permits(Role::Judge));
    }
}
