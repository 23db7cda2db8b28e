//! The submission pipeline: validate rows, then fold into a configuration.

pub mod assemble;
pub mod validate;

pub use assemble::{assemble_configuration, ResolvedUser};
pub use validate::{
    validate_submission, validate_user_fields, PasswordChange, RowErrors, ValidatedUser,
    ValidationReport, LOGIN_FORMAT_ERROR, NAME_FORMAT_ERROR, PASSWORD_MISMATCH_ERROR,
};
