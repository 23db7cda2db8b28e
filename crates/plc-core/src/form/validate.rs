//! Per-row field validation for form submissions.
//!
//! Each submitted user row is checked against three rules:
//!
//! 1. the login must match `^[a-z.-]+$`,
//! 2. the name must match `^[a-zA-Z. -]+$`,
//! 3. the two password fields must agree.
//!
//! A row whose login *and* name are both blank is an untouched placeholder
//! slot.  It is dropped without producing an error or a record, and without
//! shifting the indices of later rows: every surviving row keeps the index it
//! had in the submission, which later drives password retention.
//!
//! Every row is validated before anything else happens.  One bad row blocks
//! the whole submission; the operator corrects the form and resubmits.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::submission::{FormSubmission, LocalUserForm};

/// Message produced when a login fails the format check.
pub const LOGIN_FORMAT_ERROR: &str = "Login is not in correct format.";
/// Message produced when a name fails the format check.
pub const NAME_FORMAT_ERROR: &str = "Name is not in correct format.";
/// Message produced when the two password fields differ.
pub const PASSWORD_MISMATCH_ERROR: &str = "Passwords do not match.";

static LOGIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z.-]+$").expect("valid pattern"));
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z. -]+$").expect("valid pattern"));

/// What to do about one row's stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordChange {
    /// Both password fields were left empty: keep the hash already stored at
    /// this row's index in the previous configuration.
    Keep,
    /// Hash this plaintext and store the result.
    Set(String),
}

/// A successfully validated user row, ready for credential resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    /// Zero-based index of the row in the submission it came from.  Retained
    /// so password retention can look up the previous configuration's record
    /// at the same position even when blank rows were dropped in between.
    pub row: usize,
    pub login: String,
    pub name: String,
    pub is_admin: bool,
    pub password: PasswordChange,
}

/// Validation failures for a single submitted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowErrors {
    /// Zero-based index of the offending row in the submission.
    pub row: usize,
    /// Human-readable messages, in check order.
    pub messages: Vec<String>,
}

impl RowErrors {
    /// All messages for this row joined for inline display.
    pub fn joined(&self) -> String {
        self.messages.join(" / ")
    }
}

/// Every validation failure from one submission, grouped by row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_report(.rows))]
pub struct ValidationReport {
    pub rows: Vec<RowErrors>,
}

fn format_report(rows: &[RowErrors]) -> String {
    rows.iter()
        .map(|row| format!("row {}: {}", row.row, row.joined()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks one user row's fields, returning all failures in check order.
///
/// An empty result means the row is valid.  Blank-row handling is the
/// caller's concern; this function reports a blank login or name as a format
/// failure like any other.
pub fn validate_user_fields(form: &LocalUserForm) -> Vec<String> {
    let mut messages = Vec::new();

    if !LOGIN_PATTERN.is_match(&form.login) {
        messages.push(LOGIN_FORMAT_ERROR.to_string());
    }
    if !NAME_PATTERN.is_match(&form.name) {
        messages.push(NAME_FORMAT_ERROR.to_string());
    }
    if form.password1 != form.password2 {
        messages.push(PASSWORD_MISMATCH_ERROR.to_string());
    }

    messages
}

/// Validates every row of a submission.
///
/// Blank rows are dropped silently.  If any remaining row fails a check, the
/// whole submission is rejected and the report lists every failing row; no
/// partial results are returned.
///
/// # Errors
///
/// Returns a [`ValidationReport`] naming each failing row and its messages.
pub fn validate_submission(
    submission: &FormSubmission,
) -> Result<Vec<ValidatedUser>, ValidationReport> {
    let mut users = Vec::new();
    let mut failures = Vec::new();

    for (row, form) in submission.local_users.iter().enumerate() {
        if form.is_blank() {
            continue;
        }

        let messages = validate_user_fields(form);
        if !messages.is_empty() {
            failures.push(RowErrors { row, messages });
            continue;
        }

        let password = if form.password1.is_empty() {
            PasswordChange::Keep
        } else {
            PasswordChange::Set(form.password1.clone())
        };

        users.push(ValidatedUser {
            row,
            login: form.login.clone(),
            name: form.name.clone(),
            is_admin: form.admin,
            password,
        });
    }

    if failures.is_empty() {
        Ok(users)
    } else {
        Err(ValidationReport { rows: failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn row(login: &str, name: &str, pw1: &str, pw2: &str) -> LocalUserForm {
        LocalUserForm {
            login: login.to_string(),
            name: name.to_string(),
            admin: false,
            password1: pw1.to_string(),
            password2: pw2.to_string(),
        }
    }

    fn submission_of(rows: Vec<LocalUserForm>) -> FormSubmission {
        FormSubmission {
            local_users: rows,
            ..FormSubmission::seed_from(&crate::domain::config::Configuration::default())
        }
    }

    // ── validate_user_fields ──────────────────────────────────────────────────

    #[test]
    fn test_valid_row_produces_no_messages() {
        let form = row("alice.smith", "Alice Smith", "hunter2", "hunter2");
        assert!(validate_user_fields(&form).is_empty());
    }

    #[test]
    fn test_login_accepts_lowercase_dots_and_dashes_only() {
        for login in ["alice", "a.b-c", "...", "---"] {
            let form = row(login, "Name", "", "");
            assert!(validate_user_fields(&form).is_empty(), "{login} should pass");
        }
        for login in ["Alice", "alice smith", "alice7", "bad user!", ""] {
            let form = row(login, "Name", "", "");
            assert_eq!(
                validate_user_fields(&form),
                vec![LOGIN_FORMAT_ERROR.to_string()],
                "{login:?} should fail"
            );
        }
    }

    #[test]
    fn test_name_accepts_letters_dots_spaces_and_dashes() {
        for name in ["Alice Smith", "Dr. Who", "Anna-Leena", "J. R. R."] {
            let form = row("alice", name, "", "");
            assert!(validate_user_fields(&form).is_empty(), "{name} should pass");
        }
        for name in ["Alice7", "Alice_Smith", "Alice!", ""] {
            let form = row("alice", name, "", "");
            assert_eq!(
                validate_user_fields(&form),
                vec![NAME_FORMAT_ERROR.to_string()],
                "{name:?} should fail"
            );
        }
    }

    #[test]
    fn test_password_mismatch_is_reported_regardless_of_other_fields() {
        let form = row("alice", "Alice", "abc", "xyz");
        assert_eq!(
            validate_user_fields(&form),
            vec![PASSWORD_MISMATCH_ERROR.to_string()]
        );
    }

    #[test]
    fn test_all_failures_are_collected_in_check_order() {
        let form = row("Bad User!", "Name 123", "abc", "xyz");
        assert_eq!(
            validate_user_fields(&form),
            vec![
                LOGIN_FORMAT_ERROR.to_string(),
                NAME_FORMAT_ERROR.to_string(),
                PASSWORD_MISMATCH_ERROR.to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_passwords_match_and_are_valid() {
        let form = row("alice", "Alice", "", "");
        assert!(validate_user_fields(&form).is_empty());
    }

    // ── validate_submission ───────────────────────────────────────────────────

    #[test]
    fn test_valid_submission_yields_users_in_row_order() {
        let submission = submission_of(vec![
            row("alice", "Alice", "pw", "pw"),
            row("bob", "Bob", "", ""),
        ]);

        let users = validate_submission(&submission).expect("valid");

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].login, "alice");
        assert_eq!(users[0].row, 0);
        assert_eq!(users[1].login, "bob");
        assert_eq!(users[1].row, 1);
    }

    #[test]
    fn test_blank_rows_are_dropped_without_error() {
        let submission = submission_of(vec![
            row("alice", "Alice", "", ""),
            row("", "", "", ""),
            row("   ", " ", "", ""),
        ]);

        let users = validate_submission(&submission).expect("valid");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].login, "alice");
    }

    #[test]
    fn test_rows_after_a_dropped_blank_keep_their_submission_index() {
        let submission = submission_of(vec![
            row("", "", "", ""),
            row("bob", "Bob", "", ""),
        ]);

        let users = validate_submission(&submission).expect("valid");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].row, 1, "index must match the submitted position");
    }

    #[test]
    fn test_one_bad_row_rejects_the_whole_submission() {
        let submission = submission_of(vec![
            row("alice", "Alice", "", ""),
            row("Bad User!", "Bob", "", ""),
        ]);

        let report = validate_submission(&submission).expect_err("must fail");

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].row, 1);
        assert_eq!(report.rows[0].messages, vec![LOGIN_FORMAT_ERROR.to_string()]);
    }

    #[test]
    fn test_report_collects_every_failing_row() {
        let submission = submission_of(vec![
            row("UPPER", "Alice", "", ""),
            row("bob", "Bob", "abc", "xyz"),
        ]);

        let report = validate_submission(&submission).expect_err("must fail");

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].row, 0);
        assert_eq!(report.rows[1].row, 1);
    }

    #[test]
    fn test_report_joins_row_messages_with_slashes() {
        let errors = RowErrors {
            row: 0,
            messages: vec![
                LOGIN_FORMAT_ERROR.to_string(),
                PASSWORD_MISMATCH_ERROR.to_string(),
            ],
        };
        assert_eq!(
            errors.joined(),
            "Login is not in correct format. / Passwords do not match."
        );
    }

    #[test]
    fn test_report_display_lists_one_line_per_row() {
        let report = ValidationReport {
            rows: vec![
                RowErrors { row: 0, messages: vec![LOGIN_FORMAT_ERROR.to_string()] },
                RowErrors { row: 2, messages: vec![PASSWORD_MISMATCH_ERROR.to_string()] },
            ],
        };
        assert_eq!(
            report.to_string(),
            "row 0: Login is not in correct format.\nrow 2: Passwords do not match."
        );
    }

    #[test]
    fn test_empty_password_resolves_to_keep() {
        let submission = submission_of(vec![row("alice", "Alice", "", "")]);
        let users = validate_submission(&submission).expect("valid");
        assert_eq!(users[0].password, PasswordChange::Keep);
    }

    #[test]
    fn test_nonempty_password_resolves_to_set() {
        let submission = submission_of(vec![row("alice", "Alice", "hunter2", "hunter2")]);
        let users = validate_submission(&submission).expect("valid");
        assert_eq!(users[0].password, PasswordChange::Set("hunter2".to_string()));
    }

    #[test]
    fn test_admin_flag_is_carried_through_validation() {
        let mut admin_row = row("alice", "Alice", "", "");
        admin_row.admin = true;
        let submission = submission_of(vec![admin_row]);

        let users = validate_submission(&submission).expect("valid");
        assert!(users[0].is_admin);
    }

    #[test]
    fn test_empty_submission_is_valid_and_yields_no_users() {
        let submission = submission_of(Vec::new());
        let users = validate_submission(&submission).expect("valid");
        assert!(users.is_empty());
    }
}
