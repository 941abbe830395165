use crate::access_control::domain::model::entities::role_definition::RoleDefinition;

/// Coarse allow-list check run before any policy evaluation.
pub fn roles_allow(roles: &[RoleDefinition], action: &str) -> bool {
    roles
        .iter()
        .any(|role| permissions_allow(&role.permissions, action))
}

/// A permission grants `action` when it is `*`, equals it ignoring case, or is a
/// `prefix:*` entry whose prefix (colon included) starts the action.
pub fn permissions_allow(permissions: &[String], action: &str) -> bool {
    let action_lower = action.to_ascii_lowercase();

    permissions.iter().any(|permission| {
        if permission == "*" || permission.eq_ignore_ascii_case(action) {
            return true;
        }

        match permission.strip_suffix('*') {
            Some(prefix) if prefix.ends_with(':') => {
                action_lower.starts_with(&prefix.to_ascii_lowercase())
            }
            _ => false,
        }
    })
}
