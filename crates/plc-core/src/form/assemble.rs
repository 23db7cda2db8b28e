//! Folds validated form input into a new [`Configuration`].
//!
//! Assembly is a pure function over the submission and the already-resolved
//! user credentials.  It never reads the previous configuration: every
//! submission replaces the whole file, so the output is built from scratch.
//!
//! The allow-list is resolved from the login-policy selection:
//!
//! - all domain users → `["*"]`
//! - some domain users → the typed, non-blank domain usernames (first
//!   occurrence wins) followed by every local login
//! - no selection → empty list

use tracing::warn;

use crate::domain::config::{Configuration, LocalUser, ALL_USERS_WILDCARD, SCHEMA_VERSION};
use crate::domain::submission::{DomainLoginPolicy, FormSubmission};

/// A validated user row with its final credential hash attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub login: String,
    pub name: String,
    pub is_admin: bool,
    /// The hash to store: newly computed, carried over from the previous
    /// configuration, or empty when there was nothing to carry over.
    pub hashed_password: String,
}

/// Builds the configuration to persist from a submission and its resolved
/// users.
///
/// Row order is preserved everywhere: `local_users` and `admins` follow the
/// order of `users`, and the allow-list keeps typed entries before local
/// logins.  Duplicate logins are not rejected, matching validation, but they
/// break downstream consumers' assumptions and are logged.
pub fn assemble_configuration(
    submission: &FormSubmission,
    users: Vec<ResolvedUser>,
) -> Configuration {
    let mut admins = Vec::new();
    let mut local_users = Vec::new();

    for user in users {
        if local_users.iter().any(|existing: &LocalUser| existing.login == user.login) {
            warn!("duplicate local user login in submission: {}", user.login);
        }
        if user.is_admin {
            admins.push(user.login.clone());
        }
        local_users.push(LocalUser {
            hashed_password: user.hashed_password,
            login: user.login,
            name: user.name,
        });
    }

    let allow_logins_for = resolve_allow_list(submission, &local_users);

    Configuration {
        admins,
        allow_logins_for,
        allow_remoteadmins: submission.allow_remoteadmins,
        licenses: submission.licenses.clone(),
        local_users,
        version: Some(SCHEMA_VERSION),
    }
}

fn resolve_allow_list(submission: &FormSubmission, local_users: &[LocalUser]) -> Vec<String> {
    match submission.allow_logins_for {
        DomainLoginPolicy::AllPuavoDomainUsers => vec![ALL_USERS_WILDCARD.to_string()],
        DomainLoginPolicy::SomePuavoDomainUsers => {
            let mut list: Vec<String> = Vec::new();
            for typed in &submission.allowed_puavo_users {
                // Blank entries are leftover empty list slots; typed names
                // are kept verbatim otherwise.
                if typed.trim().is_empty() {
                    continue;
                }
                if !list.contains(typed) {
                    list.push(typed.clone());
                }
            }
            // Local users may always log in, whether or not they were typed.
            for user in local_users {
                list.push(user.login.clone());
            }
            list
        }
        DomainLoginPolicy::Unspecified => Vec::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
