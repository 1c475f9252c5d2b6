pub mod organization;
pub mod session;

pub use organization::OrganizationStore;
pub use session::SessionStore;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a persisted store file, falling back to the default when the file is
/// missing or unreadable. A corrupt file is treated the same as an absent one;
/// the stores must come up empty rather than fail.
fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        return T::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring corrupt store file {}: {}", path.display(), e);
            T::default()
        }),
        Err(e) => {
            tracing::warn!("failed to read store file {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Persist a store snapshot. Failures are logged and swallowed; store
/// operations never surface a persistence error to the caller.
fn persist<T: Serialize>(path: &Path, state: &T) {
    let write = || -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(path, content)?;
        Ok(())
    };
    if let Err(e) = write() {
        tracing::warn!("failed to persist store file {}: {}", path.display(), e);
    }
}
