//! Pure permission checks over a [`Principal`]'s access rules.
//!
//! Every check takes `Option<&Principal>`; no principal means no access.

use super::types::{Action, Principal, Role, ScopeType};

/// Whether the principal holds any system-level rule.
pub fn has_system_access(principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| {
        p.access_rules
            .iter()
            .any(|rule| rule.scope_type == ScopeType::System)
    })
}

/// Whether the principal holds any tenant- or system-level rule.
pub fn has_tenant_access(principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| {
        p.access_rules
            .iter()
            .any(|rule| rule.scope_type.covers_all_camps())
    })
}

/// Decides whether `principal` may perform `action` on a scope.
///
/// System rules allow everything. Tenant rules allow everything at tenant and
/// camp scope. A camp rule for `scope_id` allows everything for admins and
/// only reads for viewers.
///
/// # Examples
///
/// ```
/// use campsync_core::permissions::{has_permission, AccessRule, Action, Principal, Role, ScopeType};
///
/// let viewer = Principal::new("user-viewer", "viewer@example.com")
///     .with_rule(AccessRule::camp(Role::Viewer, "camp-1"));
///
/// assert!(has_permission(Some(&viewer), Action::Read, ScopeType::Camp, Some("camp-1")));
/// assert!(!has_permission(Some(&viewer), Action::Update, ScopeType::Camp, Some("camp-1")));
/// assert!(!has_permission(None, Action::Read, ScopeType::Camp, Some("camp-1")));
/// ```
pub fn has_permission(
    principal: Option<&Principal>,
    action: Action,
    scope_type: ScopeType,
    scope_id: Option<&str>,
) -> bool {
    let Some(p) = principal else {
        return false;
    };

    if has_system_access(principal) {
        return true;
    }

    if has_tenant_access(principal) && matches!(scope_type, ScopeType::Tenant | ScopeType::Camp) {
        return true;
    }

    match (scope_type, scope_id) {
        (ScopeType::Camp, Some(camp_id)) => match p.camp_rule(camp_id) {
            Some(rule) if rule.role == Role::Viewer => action == Action::Read,
            Some(_) => true,
            None => false,
        },
        _ => false,
    }
}

pub fn can_create(principal: Option<&Principal>, camp_id: Option<&str>) -> bool {
    has_permission(principal, Action::Create, ScopeType::Camp, camp_id)
}

pub fn can_view(principal: Option<&Principal>, camp_id: Option<&str>) -> bool {
    has_permission(principal, Action::Read, ScopeType::Camp, camp_id)
}

pub fn can_edit(principal: Option<&Principal>, camp_id: &str) -> bool {
    has_permission(principal, Action::Update, ScopeType::Camp, Some(camp_id))
}

pub fn can_delete(principal: Option<&Principal>, camp_id: &str) -> bool {
    has_permission(principal, Action::Delete, ScopeType::Camp, Some(camp_id))
}

/// Effective role within a camp. Tenant and system principals are admins everywhere.
pub fn role_for_camp(principal: Option<&Principal>, camp_id: &str) -> Option<Role> {
    let p = principal?;
    if has_tenant_access(principal) {
        return Some(Role::Admin);
    }
    p.camp_rule(camp_id).map(|rule| rule.role)
}

/// Camp IDs the principal was granted explicitly, in rule order.
///
/// Returns an empty list for tenant and system principals, who can reach
/// every camp, and for no principal at all. Pair with [`has_tenant_access`]
/// to tell the two apart.
pub fn accessible_camp_ids(principal: Option<&Principal>) -> Vec<String> {
    let Some(p) = principal else {
        return Vec::new();
    };

    let mut camp_ids: Vec<String> = Vec::new();
    for rule in &p.access_rules {
        if rule.scope_type.covers_all_camps() {
            return Vec::new();
        }
        if let Some(id) = rule.scope_id.as_ref().filter(|_| rule.scope_type == ScopeType::Camp) {
            if !camp_ids.contains(id) {
                camp_ids.push(id.clone());
            }
        }
    }
    camp_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::AccessRule;

    fn system_admin() -> Principal {
        Principal::new("user-system", "system@admin.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::system(Role::Admin))
    }

    fn tenant_admin() -> Principal {
        Principal::new("user-tenant-admin", "tenant@admin.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::tenant(Role::Admin, "tenant-1"))
    }

    fn camp_admin() -> Principal {
        Principal::new("user-camp-admin", "camp@admin.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::camp(Role::Admin, "camp-1"))
    }

    fn mixed() -> Principal {
        Principal::new("user-mixed", "mixed@user.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::camp(Role::Admin, "camp-1"))
            .with_rule(AccessRule::camp(Role::Viewer, "camp-2"))
    }

    fn viewer() -> Principal {
        Principal::new("user-viewer", "viewer@user.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::camp(Role::Viewer, "camp-1"))
    }

    const ALL_ACTIONS: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    #[test]
    fn no_principal_has_no_access() {
        for action in ALL_ACTIONS {
            assert!(!has_permission(None, action, ScopeType::System, None));
            assert!(!has_permission(None, action, ScopeType::Camp, Some("camp-1")));
        }
        assert_eq!(role_for_camp(None, "camp-1"), None);
        assert!(accessible_camp_ids(None).is_empty());
        assert!(!has_system_access(None));
        assert!(!has_tenant_access(None));
    }

    #[test]
    fn system_admin_can_do_everything() {
        let p = system_admin();
        for action in ALL_ACTIONS {
            assert!(has_permission(Some(&p), action, ScopeType::System, None));
            assert!(has_permission(Some(&p), action, ScopeType::Camp, Some("camp-9")));
        }
        assert!(has_system_access(Some(&p)));
        assert!(has_tenant_access(Some(&p)));
    }

    #[test]
    fn tenant_admin_covers_tenant_and_camps_but_not_system() {
        let p = tenant_admin();
        assert!(has_permission(Some(&p), Action::Delete, ScopeType::Camp, Some("camp-9")));
        assert!(has_permission(Some(&p), Action::Update, ScopeType::Tenant, Some("tenant-1")));
        assert!(!has_permission(Some(&p), Action::Read, ScopeType::System, None));
        assert!(!has_system_access(Some(&p)));
    }

    #[test]
    fn camp_admin_is_limited_to_their_camp() {
        let p = camp_admin();
        for action in ALL_ACTIONS {
            assert!(has_permission(Some(&p), action, ScopeType::Camp, Some("camp-1")));
        }
        assert!(!has_permission(Some(&p), Action::Read, ScopeType::Camp, Some("camp-2")));
        assert!(!has_permission(Some(&p), Action::Read, ScopeType::Camp, None));
        assert!(!has_permission(Some(&p), Action::Read, ScopeType::Tenant, Some("tenant-1")));
    }

    #[test]
    fn viewer_can_only_read() {
        let p = viewer();
        assert!(can_view(Some(&p), Some("camp-1")));
        assert!(!can_create(Some(&p), Some("camp-1")));
        assert!(!can_edit(Some(&p), "camp-1"));
        assert!(!can_delete(Some(&p), "camp-1"));
    }

    #[test]
    fn program_admin_can_write_in_their_camp() {
        let p = Principal::new("user-programs", "programs@user.com")
            .with_rule(AccessRule::camp(Role::ProgramAdmin, "camp-1"));
        assert!(can_create(Some(&p), Some("camp-1")));
        assert!(can_delete(Some(&p), "camp-1"));
        assert!(!can_view(Some(&p), Some("camp-2")));
        assert_eq!(role_for_camp(Some(&p), "camp-1"), Some(Role::ProgramAdmin));
    }

    #[test]
    fn mixed_roles_are_resolved_per_camp() {
        let p = mixed();
        assert!(can_edit(Some(&p), "camp-1"));
        assert!(!can_edit(Some(&p), "camp-2"));
        assert!(can_view(Some(&p), Some("camp-2")));
        assert_eq!(role_for_camp(Some(&p), "camp-1"), Some(Role::Admin));
        assert_eq!(role_for_camp(Some(&p), "camp-2"), Some(Role::Viewer));
        assert_eq!(role_for_camp(Some(&p), "camp-3"), None);
    }

    #[test]
    fn tenant_and_system_are_admin_in_every_camp() {
        assert_eq!(role_for_camp(Some(&tenant_admin()), "camp-7"), Some(Role::Admin));
        assert_eq!(role_for_camp(Some(&system_admin()), "camp-7"), Some(Role::Admin));
    }

    #[test]
    fn accessible_camp_ids_lists_camp_rules() {
        assert_eq!(accessible_camp_ids(Some(&mixed())), vec!["camp-1", "camp-2"]);
        assert_eq!(accessible_camp_ids(Some(&viewer())), vec!["camp-1"]);
    }

    #[test]
    fn accessible_camp_ids_empty_means_all_for_admins() {
        assert!(accessible_camp_ids(Some(&tenant_admin())).is_empty());
        assert!(accessible_camp_ids(Some(&system_admin())).is_empty());

        let p = camp_admin().with_rule(AccessRule::tenant(Role::Admin, "tenant-1"));
        assert!(accessible_camp_ids(Some(&p)).is_empty());
    }
}
