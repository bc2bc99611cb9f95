mod functions;
mod types;

pub use functions::{
    accessible_camp_ids, can_create, can_delete, can_edit, can_view, has_permission,
    has_system_access, has_tenant_access, role_for_camp,
};
pub use types::{AccessRule, Action, Principal, Role, ScopeType};
