//! Author identity record.

use serde::{Deserialize, Serialize};

/// Stable integer identifier assigned by storage.
pub type AuthorId = i64;

/// Maximum number of characters in a stored author secret.
pub const SECRET_MAX_LENGTH: usize = 150;

/// Identity record used for credential checks.
///
/// The secret is plaintext; authors are created only by seed data and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    #[serde(skip_serializing)]
    pub secret: String,
    #[serde(rename = "sudoer")]
    pub is_sudoer: bool,
}

impl Author {
    /// Returns whether `secret` matches exactly.
    pub fn secret_matches(&self, secret: &str) -> bool {
        self.secret == secret
    }
}
