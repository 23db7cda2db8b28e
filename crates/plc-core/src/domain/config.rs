//! Persisted login-configuration entity.
//!
//! The configuration lives on disk as a single JSON object, conventionally at
//! `/state/etc/puavo/local/config.json`:
//!
//! ```json
//! {
//!   "admins": ["alice"],
//!   "allow_logins_for": ["alice", "visitor.domain"],
//!   "allow_remoteadmins": false,
//!   "licenses": {"smartboard": true},
//!   "local_users": [
//!     {"hashed_password": "$6$salt$digest", "login": "alice", "name": "Alice Example"}
//!   ],
//!   "version": 1
//! }
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default)]` so that configurations written by
//! older tooling, which may be missing newer fields, still load.  A missing
//! *field* deserializes to its type's empty value; a missing *file* is a
//! different case and maps to [`Configuration::default`], which allows all
//! domain users to log in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Allow-list entry meaning "all domain users may log in".
pub const ALL_USERS_WILDCARD: &str = "*";

/// Schema version stamped into every configuration this tool writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level login configuration stored on disk.
///
/// Field declaration order matches the serialized JSON object key order, so a
/// file written by this tool diffs cleanly against one written by earlier
/// tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Configuration {
    /// Logins granted administrative rights.  Semantically a subset of
    /// `local_users` logins.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Identities permitted to log in: either exactly `["*"]` or an explicit
    /// list of domain usernames plus every local login.
    #[serde(default)]
    pub allow_logins_for: Vec<String>,
    /// Whether remote administrators may log in to this machine.
    #[serde(default)]
    pub allow_remoteadmins: bool,
    /// License acceptance state keyed by restricted-package name.
    #[serde(default)]
    pub licenses: IndexMap<String, bool>,
    /// Local accounts managed by this tool.
    #[serde(default)]
    pub local_users: Vec<LocalUser>,
    /// Schema version tag.  Absent in files predating the tag and in the
    /// built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// A local OS account managed by this tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalUser {
    /// Opaque crypt(3)-style credential hash.  Empty only transiently, as a
    /// marker for "keep the previously stored hash".
    #[serde(default)]
    pub hashed_password: String,
    /// Account login.
    #[serde(default)]
    pub login: String,
    /// Human-readable full name.
    #[serde(default)]
    pub name: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            admins: Vec::new(),
            allow_logins_for: vec![ALL_USERS_WILDCARD.to_string()],
            allow_remoteadmins: false,
            licenses: IndexMap::new(),
            local_users: Vec::new(),
            version: None,
        }
    }
}

impl Configuration {
    /// Returns `true` when the allow-list contains the wildcard entry.
    pub fn allows_all_domain_users(&self) -> bool {
        self.allow_logins_for
            .iter()
            .any(|entry| entry == ALL_USERS_WILDCARD)
    }

    /// Logins of all local users, in stored order.
    pub fn local_logins(&self) -> Vec<String> {
        self.local_users
            .iter()
            .map(|user| user.login.clone())
            .collect()
    }

    /// Explicitly allowed domain usernames: the allow-list minus every local
    /// login.
    ///
    /// Returns an empty list when the wildcard is present, since the wildcard
    /// already covers every domain user.
    pub fn domain_allow_list(&self) -> Vec<String> {
        if self.allows_all_domain_users() {
            return Vec::new();
        }
        let local = self.local_logins();
        self.allow_logins_for
            .iter()
            .filter(|entry| !local.contains(*entry))
            .cloned()
            .collect()
    }

    /// Returns `true` when `login` has administrative rights.
    pub fn is_admin(&self, login: &str) -> bool {
        self.admins.iter().any(|admin| admin == login)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
