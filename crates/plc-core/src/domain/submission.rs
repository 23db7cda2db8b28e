//! Operator form submission.
//!
//! The editable form shows one row per local user plus the machine-wide
//! policy controls.  A submission captures the state of those controls as one
//! structured value: user rows stay in display order, and the login-policy
//! radio selection arrives as a typed enum rather than a raw string.
//!
//! A submission is also how state flows *out* of the editor:
//! [`FormSubmission::seed_from`] turns the current configuration back into
//! form values so the operator starts from what is already on disk.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::config::Configuration;

/// The mutually-exclusive login-policy radio selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DomainLoginPolicy {
    /// Any domain user may log in; the allow-list collapses to `["*"]`.
    AllPuavoDomainUsers,
    /// Only the explicitly listed domain users, plus every local user.
    SomePuavoDomainUsers,
    /// No selection made.  Resolves to an empty allow-list.
    #[default]
    #[serde(other)]
    Unspecified,
}

/// One editable user row as submitted by the operator.
///
/// Passwords are entered twice for confirmation and are never stored in this
/// form; leaving both empty keeps the previously stored hash for this row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LocalUserForm {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: String,
    /// Whether the "administrative rights" checkbox is ticked.
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// A complete form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormSubmission {
    /// User rows in display order.  Fully blank rows are legal and dropped
    /// during validation.
    #[serde(default)]
    pub local_users: Vec<LocalUserForm>,
    /// The login-policy radio selection.
    #[serde(default)]
    pub allow_logins_for: DomainLoginPolicy,
    /// Domain usernames typed into the "some domain users" list.
    #[serde(default)]
    pub allowed_puavo_users: Vec<String>,
    /// State of the "allow remote admins" checkbox.
    #[serde(default)]
    pub allow_remoteadmins: bool,
    /// License acceptance checkboxes keyed by restricted-package name.
    #[serde(default)]
    pub licenses: IndexMap<String, bool>,
}

impl LocalUserForm {
    /// Returns `true` when both login and name are blank or whitespace-only.
    ///
    /// Such rows are placeholder slots the operator never filled in.
    pub fn is_blank(&self) -> bool {
        self.login.trim().is_empty() && self.name.trim().is_empty()
    }
}

impl FormSubmission {
    /// Builds the form values an operator sees when the editor opens: the
    /// current configuration with password fields cleared.
    ///
    /// The returned submission always has at least one user row; an empty
    /// placeholder is appended when the configuration has no local users.
    pub fn seed_from(config: &Configuration) -> Self {
        let mut local_users: Vec<LocalUserForm> = config
            .local_users
            .iter()
            .map(|user| LocalUserForm {
                login: user.login.clone(),
                name: user.name.clone(),
                admin: config.is_admin(&user.login),
                password1: String::new(),
                password2: String::new(),
            })
            .collect();
        if local_users.is_empty() {
            local_users.push(LocalUserForm::default());
        }

        let allow_logins_for = if config.allows_all_domain_users() {
            DomainLoginPolicy::AllPuavoDomainUsers
        } else {
            DomainLoginPolicy::SomePuavoDomainUsers
        };

        Self {
            local_users,
            allow_logins_for,
            allowed_puavo_users: config.domain_allow_list(),
            allow_remoteadmins: config.allow_remoteadmins,
            licenses: config.licenses.clone(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
