//! Conditional checks as reported by the check classifier

use super::ids::{CheckId, NodeId};
use serde::{Deserialize, Serialize};

/// Who inserted the check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOrigin {
    /// Compiler-inserted sanitizer check (SC)
    Sanitizer,
    /// Programmer-written check (UC)
    User,
}

/// What a sanitizer check guards
///
/// Address checks compare memory locations; generic checks (overflow,
/// type, shift, ...) and user checks compare value provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuardKind {
    Address,
    #[default]
    Generic,
}

/// Which successor of a check's branch is the non-failure path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularSuccessor {
    Left,
    Right,
    Unknown,
}

/// A conditional branch tagged as SC or UC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionalCheck {
    pub id: CheckId,
    pub branch: NodeId,
    pub origin: CheckOrigin,
    #[serde(default)]
    pub kind: GuardKind,
}

impl ConditionalCheck {
    pub fn sanitizer(id: u64, branch: NodeId, kind: GuardKind) -> Self {
        Self {
            id: CheckId(id),
            branch,
            origin: CheckOrigin::Sanitizer,
            kind,
        }
    }

    pub fn user(id: u64, branch: NodeId) -> Self {
        Self {
            id: CheckId(id),
            branch,
            origin: CheckOrigin::User,
            kind: GuardKind::Generic,
        }
    }

    pub fn is_sanitizer(&self) -> bool {
        self.origin == CheckOrigin::Sanitizer
    }
}
