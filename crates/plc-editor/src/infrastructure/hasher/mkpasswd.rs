//! `mkpasswd`-backed password hashing.
//!
//! Local user passwords are never stored in the clear: the editor pipes
//! the plaintext to `mkpasswd -m sha-512 -s` and stores the resulting
//! crypt(3) string.  The `-s` flag makes the tool read the password from
//! stdin, keeping it out of the process argument list, which any user on
//! the machine can read through `/proc`.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::submit::{HasherError, PasswordHasher};

/// Hashes passwords by piping them to the `mkpasswd` tool.
pub struct MkpasswdHasher;

#[async_trait]
impl PasswordHasher for MkpasswdHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, HasherError> {
        let mut child = Command::new("mkpasswd")
            .args(["-m", "sha-512", "-s"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HasherError::Process(format!("failed to spawn mkpasswd: {e}")))?;

        // Close stdin after writing, or mkpasswd waits for more input forever.
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| HasherError::Process("mkpasswd stdin was not captured".into()))?;
            stdin
                .write_all(plaintext.as_bytes())
                .await
                .map_err(|e| HasherError::Process(format!("failed to write to mkpasswd: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| HasherError::Process(format!("failed to wait for mkpasswd: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HasherError::Rejected(format!(
                "mkpasswd exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let mut hash = String::from_utf8_lossy(&output.stdout).into_owned();
        // mkpasswd terminates its output with exactly one newline.
        if hash.ends_with('\n') {
            hash.pop();
        }
        Ok(hash)
    }
}
