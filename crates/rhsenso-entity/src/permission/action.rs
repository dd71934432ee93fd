//! CRUD actions, keyed by the legacy permission letters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An action a user may be granted on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `C` (consultar): list and read.
    #[serde(rename = "C")]
    Read,
    /// `I` (incluir): create.
    #[serde(rename = "I")]
    Create,
    /// `A` (alterar): update.
    #[serde(rename = "A")]
    Update,
    /// `E` (excluir): delete.
    #[serde(rename = "E")]
    Delete,
}

impl Action {
    /// All actions, in letter order `C I A E`.
    pub const ALL: [Action; 4] = [Self::Read, Self::Create, Self::Update, Self::Delete];

    /// The legacy permission letter.
    pub fn letter(&self) -> char {
        match self {
            Self::Read => 'C',
            Self::Create => 'I',
            Self::Update => 'A',
            Self::Delete => 'E',
        }
    }

    /// Parse a single legacy letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Self::Read),
            'I' => Some(Self::Create),
            'A' => Some(Self::Update),
            'E' => Some(Self::Delete),
            _ => None,
        }
    }

    /// Lowercase verb used in log fields and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = rhsenso_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(Self::from_letter), chars.next()) {
            (Some(action), None) => Ok(action),
            _ => Err(rhsenso_core::AppError::validation(format!(
                "Invalid action: '{s}'. Expected one of: C, I, A, E"
            ))),
        }
    }
}
