//! The signed-in account.

use campsync_core::cache::Clock;
use campsync_core::permissions::{
    accessible_camp_ids, can_create, can_delete, can_edit, can_view, has_system_access,
    has_tenant_access, role_for_camp, Principal, Role,
};
use serde::{Deserialize, Serialize};

use super::CampsyncClient;
use crate::error::Result;

const AUTH_ME_PATH: &str = "/api/auth/me";

#[derive(Deserialize)]
struct AuthMe {
    user: Principal,
}

/// What a principal may do, globally and optionally in one camp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSummary {
    pub principal: Principal,
    pub system_access: bool,
    pub tenant_access: bool,
    /// Empty when the principal can see every camp.
    pub accessible_camp_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camp: Option<CampAccess>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampAccess {
    pub camp_id: String,
    pub role: Option<Role>,
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl AccessSummary {
    pub fn new(principal: Principal, camp_id: Option<&str>) -> Self {
        let p = Some(&principal);
        let camp = camp_id.map(|camp_id| CampAccess {
            camp_id: camp_id.to_string(),
            role: role_for_camp(p, camp_id),
            can_view: can_view(p, Some(camp_id)),
            can_create: can_create(p, Some(camp_id)),
            can_edit: can_edit(p, camp_id),
            can_delete: can_delete(p, camp_id),
        });
        Self {
            system_access: has_system_access(p),
            tenant_access: has_tenant_access(p),
            accessible_camp_ids: accessible_camp_ids(p),
            camp,
            principal,
        }
    }
}

impl<C: Clock> CampsyncClient<C> {
    /// Fetch the user behind the current token, with their access rules.
    ///
    /// Not cached: the path has no camp-scoped entity type.
    pub async fn current_principal(&self) -> Result<Principal> {
        let url = self.url(AUTH_ME_PATH, &[])?;
        let body = self.get_cached(url).await?;
        let me: AuthMe = serde_json::from_str(&body)?;
        tracing::debug!(user_id = %me.user.id, rules = me.user.access_rules.len(), "Loaded current user");
        Ok(me.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campsync_core::permissions::AccessRule;

    #[test]
    fn test_summary_for_camp_viewer() {
        let principal = Principal::new("u1", "viewer@example.com")
            .with_rule(AccessRule::camp(Role::Viewer, "camp-1"));
        let summary = AccessSummary::new(principal, Some("camp-1"));

        assert!(!summary.system_access);
        assert!(!summary.tenant_access);
        assert_eq!(summary.accessible_camp_ids, vec!["camp-1".to_string()]);
        let camp = summary.camp.unwrap();
        assert_eq!(camp.role, Some(Role::Viewer));
        assert!(camp.can_view);
        assert!(!camp.can_create && !camp.can_edit && !camp.can_delete);
    }

    #[test]
    fn test_summary_for_tenant_admin() {
        let principal = Principal::new("u2", "admin@example.com")
            .with_tenant("tenant-1")
            .with_rule(AccessRule::tenant(Role::Admin, "tenant-1"));
        let summary = AccessSummary::new(principal, None);

        assert!(summary.tenant_access);
        assert!(summary.accessible_camp_ids.is_empty());
        assert!(summary.camp.is_none());
    }
}
