//! Per-resource action grants.

use std::collections::{BTreeMap, BTreeSet};

use rhsenso_core::error::AppError;
use rhsenso_entity::permission::{Action, PermissionGrant};

/// What a principal may do, resource by resource.
///
/// Administrators bypass every check. Everyone else needs an explicit
/// grant of the action's letter on the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    admin: bool,
    grants: BTreeMap<String, BTreeSet<Action>>,
}

impl PermissionSet {
    /// Build from stored grants.
    pub fn from_grants(admin: bool, grants: &[PermissionGrant]) -> Self {
        let mut set = Self {
            admin,
            grants: BTreeMap::new(),
        };
        for grant in grants {
            set.grants
                .entry(grant.resource.clone())
                .or_default()
                .extend(grant.granted());
        }
        set
    }

    /// Rebuild from the `resource -> letters` map carried in a token.
    pub fn from_claim_map(admin: bool, map: &BTreeMap<String, String>) -> Self {
        let grants = map
            .iter()
            .map(|(resource, letters)| {
                (
                    resource.clone(),
                    letters.chars().filter_map(Action::from_letter).collect(),
                )
            })
            .collect();
        Self { admin, grants }
    }

    /// `resource -> letters` map for embedding in a token.
    pub fn to_claim_map(&self) -> BTreeMap<String, String> {
        self.grants
            .iter()
            .filter(|(_, actions)| !actions.is_empty())
            .map(|(resource, actions)| {
                let letters = Action::ALL
                    .iter()
                    .filter(|a| actions.contains(a))
                    .map(Action::letter)
                    .collect();
                (resource.clone(), letters)
            })
            .collect()
    }

    /// Whether the principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Whether `action` on `resource` is allowed.
    pub fn allows(&self, resource: &str, action: Action) -> bool {
        self.admin
            || self
                .grants
                .get(resource)
                .is_some_and(|actions| actions.contains(&action))
    }

    /// Fail with `Forbidden` unless `action` on `resource` is allowed.
    pub fn require(&self, resource: &str, action: Action) -> Result<(), AppError> {
        if self.allows(resource, action) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Missing '{}' permission on '{resource}'",
                action.letter()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(resource: &str, actions: &str) -> PermissionGrant {
        PermissionGrant {
            subject: "joao".into(),
            resource: resource.into(),
            actions: actions.into(),
        }
    }

    #[test]
    fn grants_are_checked_per_resource() {
        let set = PermissionSet::from_grants(false, &[grant("jornadas", "CA"), grant("batidas", "C")]);
        assert!(set.allows("jornadas", Action::Update));
        assert!(!set.allows("jornadas", Action::Delete));
        assert!(!set.allows("horarios", Action::Read));
        assert!(set.require("batidas", Action::Create).is_err());
    }

    #[test]
    fn admin_bypasses_grants() {
        let set = PermissionSet::from_grants(true, &[]);
        assert!(set.allows("anything", Action::Delete));
    }

    #[test]
    fn claim_map_round_trips() {
        let set = PermissionSet::from_grants(false, &[grant("jornadas", "EAC"), grant("horarios", "")]);
        let map = set.to_claim_map();
        assert_eq!(map.get("jornadas").map(String::as_str), Some("CAE"));
        assert!(!map.contains_key("horarios"));
        assert_eq!(PermissionSet::from_claim_map(false, &map).to_claim_map(), map);
    }
}
