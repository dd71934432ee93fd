//! Permission grant entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::action::Action;

/// Row of `user_permissions`: the actions a subject may perform on one
/// resource, stored as legacy letters (e.g. `"CIA"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PermissionGrant {
    /// `tuse1` login or tenant user id.
    pub subject: String,
    /// Resource segment, e.g. `jornadas`.
    pub resource: String,
    /// Granted letters.
    pub actions: String,
}

impl PermissionGrant {
    /// Decode the granted letters, ignoring unknown ones.
    pub fn granted(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.actions.chars().filter_map(Action::from_letter).collect();
        actions.sort();
        actions.dedup();
        actions
    }
}
