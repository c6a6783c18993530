//! Permission evaluation against the session user's module map.

use crate::models::{Action, SessionUser};

/// Check whether `user` may perform `action` on `module_key`.
///
/// Platform admins bypass the permission map entirely. A missing user,
/// permission block, module entry or action all deny.
pub fn has_access(user: Option<&SessionUser>, module_key: &str, action: Action) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.is_platform_admin {
        return true;
    }

    user.permissions
        .as_ref()
        .and_then(|p| p.modules.get(module_key))
        .is_some_and(|grants| grants.allows(action))
}
