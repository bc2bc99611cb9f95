use serde::{Deserialize, Serialize};

/// Operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Level an access rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    System,
    Tenant,
    Camp,
}

impl ScopeType {
    /// System and tenant rules grant access to every camp.
    pub fn covers_all_camps(&self) -> bool {
        matches!(self, ScopeType::System | ScopeType::Tenant)
    }
}

/// Only `Viewer` is read-only; every other role may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    ProgramAdmin,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::ProgramAdmin => write!(f, "program-admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Grants `role` over a scope. `scope_id` is absent for system rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    pub role: Role,
    pub scope_type: ScopeType,
    #[serde(default)]
    pub scope_id: Option<String>,
}

impl AccessRule {
    pub fn system(role: Role) -> Self {
        Self {
            role,
            scope_type: ScopeType::System,
            scope_id: None,
        }
    }

    pub fn tenant(role: Role, tenant_id: impl Into<String>) -> Self {
        Self {
            role,
            scope_type: ScopeType::Tenant,
            scope_id: Some(tenant_id.into()),
        }
    }

    pub fn camp(role: Role, camp_id: impl Into<String>) -> Self {
        Self {
            role,
            scope_type: ScopeType::Camp,
            scope_id: Some(camp_id.into()),
        }
    }

    /// Whether this is a camp rule for `camp_id`.
    pub fn is_for_camp(&self, camp_id: &str) -> bool {
        self.scope_type == ScopeType::Camp && self.scope_id.as_deref() == Some(camp_id)
    }
}

/// The signed-in user, as far as authorization is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub access_rules: Vec<AccessRule>,
}

impl Principal {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            tenant_id: None,
            access_rules: Vec::new(),
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_rule(mut self, rule: AccessRule) -> Self {
        self.access_rules.push(rule);
        self
    }

    /// The camp rule for `camp_id`, if any.
    pub fn camp_rule(&self, camp_id: &str) -> Option<&AccessRule> {
        self.access_rules.iter().find(|rule| rule.is_for_camp(camp_id))
    }
}
