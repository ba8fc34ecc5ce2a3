// Session persistence: the bearer token plus a denormalized copy of the
// signed-in user, stored in ~/.config/planctl/session.toml. The token is the
// only piece of auth state that survives between invocations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::get_config_dir;

const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

pub fn get_session_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(SESSION_FILE_NAME))
}

/// None when no one is signed in.
pub fn load_session() -> Result<Option<Session>> {
    let path = get_session_file_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    let session: Session = toml::from_str(&content)
        .with_context(|| format!("Failed to parse session file: {}", path.display()))?;

    Ok(Some(session))
}

pub fn save_session(session: &Session) -> Result<()> {
    let path = get_session_file_path()?;
    let content = toml::to_string_pretty(session).context("Failed to serialize session")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    let path = get_session_file_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
    }
    Ok(())
}

/// Bearer token for outgoing requests, if any.
pub fn auth_token() -> Option<String> {
    load_session().ok().flatten().map(|s| s.token)
}
