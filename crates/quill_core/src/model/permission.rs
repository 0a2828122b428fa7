//! Caller permission levels and write outcomes.
//!
//! These are pure domain values. Mapping them to transport responses is the
//! job of the adapter crate.

use crate::model::author::AuthorId;
use serde::{Deserialize, Serialize};

/// Authorization level resolved from a claimed identity and secret.
///
/// Levels describe capabilities, not a linear scale: `WrongLogin` is not
/// "more" than `None`, it only records that the identity exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    /// No credentials supplied, or the identity is unknown.
    None,
    /// Identity exists but the secret does not match.
    WrongLogin,
    /// Valid credentials of a regular author.
    Normal,
    /// Valid credentials of a sudoer.
    Super,
}

impl PermissionLevel {
    /// Returns whether this level may create articles and attempt writes.
    pub fn can_write(self) -> bool {
        matches!(self, Self::Normal | Self::Super)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::WrongLogin => "wrong_login",
            Self::Normal => "normal",
            Self::Super => "super",
        }
    }
}

/// Outcome of an update or delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResult {
    Ok,
    LackOfPermission,
    NotExist,
}

impl ActionResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::LackOfPermission => "lack_of_permission",
            Self::NotExist => "not_exist",
        }
    }
}

/// Resolved caller handed to the article store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: AuthorId,
    pub permission: PermissionLevel,
}

impl Caller {
    pub fn new(id: AuthorId, permission: PermissionLevel) -> Self {
        Self { id, permission }
    }

    /// Ownership rule: sudoers may write anything, regular authors only
    /// their own articles, everyone else nothing.
    pub fn may_write(&self, owner: AuthorId) -> bool {
        match self.permission {
            PermissionLevel::Super => true,
            PermissionLevel::Normal => owner == self.id,
            PermissionLevel::None | PermissionLevel::WrongLogin => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Caller, PermissionLevel};

    #[test]
    fn only_authenticated_levels_can_write() {
        assert!(!PermissionLevel::None.can_write());
        assert!(!PermissionLevel::WrongLogin.can_write());
        assert!(PermissionLevel::Normal.can_write());
        assert!(PermissionLevel::Super.can_write());
    }

    #[test]
    fn ownership_rule_matches_permission_matrix() {
        let owner = 7;
        let other = 8;

        assert!(Caller::new(owner, PermissionLevel::Normal).may_write(owner));
        assert!(!Caller::new(other, PermissionLevel::Normal).may_write(owner));
        assert!(Caller::new(other, PermissionLevel::Super).may_write(owner));
        assert!(!Caller::new(owner, PermissionLevel::WrongLogin).may_write(owner));
        assert!(!Caller::new(owner, PermissionLevel::None).may_write(owner));
    }
}
