use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::builder::QueryFragments;

/// Admin roles as stored in the admins table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    CenterAdmin,
}

/// Row visibility derived from the caller's role.
///
/// A global Admin sees every center; a CenterAdmin only rows stamped with
/// their own center id. The same scope must be applied to list, detail,
/// export, update and count queries so a table and its export always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Global,
    Center(i32),
}

impl AccessScope {
    /// Resolve the scope for a session. A CenterAdmin without a center
    /// assignment can see nothing that carries a center id, so the sentinel
    /// center 0 (never a valid serial) is used rather than widening access.
    pub fn resolve(role: Role, center_id: Option<i32>) -> Self {
        match role {
            Role::Admin => AccessScope::Global,
            Role::CenterAdmin => AccessScope::Center(center_id.unwrap_or(0)),
        }
    }

    /// AND the scope predicate onto a query. `column` is the qualified
    /// center column of the driving table, e.g. `d.center_id`.
    pub fn apply(&self, frags: &mut QueryFragments, column: &str) {
        match self {
            AccessScope::Global => {}
            AccessScope::Center(center_id) => {
                frags.push_eq(column, Value::from(*center_id));
            }
        }
    }

    /// The center id new rows are stamped with, if any.
    pub fn center_id(&self) -> Option<i32> {
        match self {
            AccessScope::Global => None,
            AccessScope::Center(center_id) => Some(*center_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_scope_adds_no_predicate() {
        let mut frags = QueryFragments::new();
        AccessScope::resolve(Role::Admin, None).apply(&mut frags, "d.center_id");
        assert!(frags.is_empty());
        assert_eq!(frags.where_sql(), "");
    }

    #[test]
    fn center_admin_scope_pins_center_column() {
        let mut frags = QueryFragments::new();
        AccessScope::resolve(Role::CenterAdmin, Some(4)).apply(&mut frags, "d.center_id");
        assert_eq!(frags.where_sql(), " WHERE d.center_id = $1");
        assert_eq!(frags.params(), &[json!(4)]);
    }

    #[test]
    fn center_admin_without_center_matches_nothing() {
        let scope = AccessScope::resolve(Role::CenterAdmin, None);
        assert_eq!(scope, AccessScope::Center(0));
    }

    #[test]
    fn scope_stamps_creates() {
        assert_eq!(AccessScope::Global.center_id(), None);
        assert_eq!(AccessScope::Center(9).center_id(), Some(9));
    }
}
