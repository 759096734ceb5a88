// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission flow via the XDG desktop portal
//!
//! The stored decision is read once at launch from the portal permission
//! store (`devices`/`camera` table). When no decision exists yet, access
//! is requested exactly once through `org.freedesktop.portal.Camera`;
//! the portal answers with a `Response` signal on the request object.
//!
//! On systems without a portal there is no broker that could deny camera
//! access, so portal errors during the request resolve to `Authorized`.

use std::collections::HashMap;
use std::process;

use futures::StreamExt;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedValue, Value};

const PORTAL_BUS: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const PERMISSION_STORE_BUS: &str = "org.freedesktop.impl.portal.PermissionStore";
const PERMISSION_STORE_PATH: &str = "/org/freedesktop/impl/portal/PermissionStore";

/// Stored camera permission, read at launch and after the one-shot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The user has not been asked yet
    Undetermined,
    /// Camera access granted
    Authorized,
    /// Camera access denied
    Denied,
}

/// Permission flow errors
#[derive(Debug, Clone)]
pub enum PermissionError {
    /// D-Bus connection or call failure
    Bus(String),
    /// The portal misbehaved (missing response, malformed body)
    Portal(String),
}

impl std::fmt::Display for PermissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionError::Bus(msg) => write!(f, "D-Bus error: {}", msg),
            PermissionError::Portal(msg) => write!(f, "Portal error: {}", msg),
        }
    }
}

impl std::error::Error for PermissionError {}

impl From<zbus::Error> for PermissionError {
    fn from(err: zbus::Error) -> Self {
        PermissionError::Bus(err.to_string())
    }
}

/// Read the stored camera decision for `app_id`.
///
/// A missing store, missing table, or missing entry all mean the user has
/// not decided yet.
pub async fn query(app_id: &str) -> PermissionState {
    match lookup_stored(app_id).await {
        Ok(state) => {
            info!(?state, "stored camera permission");
            state
        }
        Err(error) => {
            debug!(%error, "no stored camera permission");
            PermissionState::Undetermined
        }
    }
}

/// Ask the portal for camera access; resolves when the user responds.
///
/// Returns `Authorized` when no portal is present to broker the request.
pub async fn request() -> PermissionState {
    match access_camera().await {
        Ok(state) => {
            info!(?state, "camera permission request answered");
            state
        }
        Err(error) => {
            warn!(%error, "camera portal unavailable, proceeding without broker");
            PermissionState::Authorized
        }
    }
}

/// Launch the system settings so the user can revisit the decision.
///
/// Best effort only; the caller terminates the process right after.
pub fn open_privacy_settings() {
    if let Err(error) = process::Command::new("cosmic-settings").spawn() {
        warn!(%error, "failed to launch cosmic-settings");
    }
}

async fn lookup_stored(app_id: &str) -> Result<PermissionState, PermissionError> {
    let connection = zbus::Connection::session().await?;

    let store = zbus::Proxy::new(
        &connection,
        PERMISSION_STORE_BUS,
        PERMISSION_STORE_PATH,
        PERMISSION_STORE_BUS,
    )
    .await?;

    let reply = store.call_method("Lookup", &("devices", "camera")).await?;
    let (permissions, _data): (HashMap<String, Vec<String>>, OwnedValue) = reply
        .body()
        .deserialize()
        .map_err(|e| PermissionError::Portal(e.to_string()))?;

    Ok(state_from_entry(permissions.get(app_id)))
}

/// Map a permission store entry to the tri-state.
///
/// The `devices` table stores `["yes"]` or `["no"]` per application.
pub fn state_from_entry(entry: Option<&Vec<String>>) -> PermissionState {
    match entry.and_then(|values| values.first()).map(String::as_str) {
        Some("yes") => PermissionState::Authorized,
        Some("no") => PermissionState::Denied,
        _ => PermissionState::Undetermined,
    }
}

async fn access_camera() -> Result<PermissionState, PermissionError> {
    let connection = zbus::Connection::session().await?;

    let camera = zbus::Proxy::new(
        &connection,
        PORTAL_BUS,
        PORTAL_PATH,
        "org.freedesktop.portal.Camera",
    )
    .await?;

    // The portal replies on a request object whose path is derived from
    // our unique name and the handle token; subscribe before calling so
    // the response cannot be missed.
    let token = format!("bubble_{}", process::id());
    let sender = connection
        .unique_name()
        .ok_or_else(|| PermissionError::Bus("connection has no unique name".to_string()))?
        .to_string();
    let handle = request_path(&sender, &token);

    let request = zbus::Proxy::new(
        &connection,
        PORTAL_BUS,
        handle.as_str(),
        "org.freedesktop.portal.Request",
    )
    .await?;
    let mut responses = request.receive_signal("Response").await?;

    let options: HashMap<&str, Value> =
        HashMap::from([("handle_token", Value::from(token.as_str()))]);
    camera.call_method("AccessCamera", &(options,)).await?;

    let message = responses
        .next()
        .await
        .ok_or_else(|| PermissionError::Portal("response stream closed".to_string()))?;

    let (code, _results): (u32, HashMap<String, OwnedValue>) = message
        .body()
        .deserialize()
        .map_err(|e| PermissionError::Portal(e.to_string()))?;

    // 0 = granted; 1 = user cancelled; 2 = other failure
    Ok(if code == 0 {
        PermissionState::Authorized
    } else {
        PermissionState::Denied
    })
}

/// Build the portal request object path for a sender and handle token.
fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("/org/freedesktop/portal/desktop/request/{sender}/{token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_yes_is_authorized() {
        let entry = vec!["yes".to_string()];
        assert_eq!(state_from_entry(Some(&entry)), PermissionState::Authorized);
    }

    #[test]
    fn stored_no_is_denied() {
        let entry = vec!["no".to_string()];
        assert_eq!(state_from_entry(Some(&entry)), PermissionState::Denied);
    }

    #[test]
    fn missing_entry_is_undetermined() {
        assert_eq!(state_from_entry(None), PermissionState::Undetermined);
        let empty = Vec::new();
        assert_eq!(state_from_entry(Some(&empty)), PermissionState::Undetermined);
    }

    #[test]
    fn request_path_escapes_unique_name() {
        assert_eq!(
            request_path(":1.42", "bubble_7"),
            "/org/freedesktop/portal/desktop/request/1_42/bubble_7"
        );
    }
}
