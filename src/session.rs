//! Logged-in session handling.
//!
//! The login flow (out of scope here) writes the session document; MediView
//! only reads it. A missing or unreadable session aborts startup with the
//! login prompt message.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the session document, written by the login flow.
pub const SESSION_FILE: &str = "session.json";

/// The logged-in user, as recorded by the login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub username: String,
}

/// Loads the session document from `path`.
pub fn load_session(path: &Path) -> Result<Session> {
    let raw = std::fs::read_to_string(path).context("Please login first.")?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Session file {} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_username_ignoring_extra_fields() {
        let path = std::env::temp_dir().join(format!(
            "mediview_session_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"username":"u1","role":"nurse"}"#).unwrap();
        let session = load_session(&path).unwrap();
        assert_eq!(session.username, "u1");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_session_is_a_login_prompt() {
        let err = load_session(Path::new("definitely_missing_session.json")).unwrap_err();
        assert!(err.to_string().contains("Please login first."));
    }
}
