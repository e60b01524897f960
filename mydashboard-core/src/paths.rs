//! Filesystem layout.
//!
//! ```text
//! ~/.mydashboard/
//!   components.yaml     (component manifest)
//!   users/
//!     <user_name>.yaml  (one file per user — mode 0600)
//! ```
//!
//! Every function touching the filesystem has an `_at(home: &Path, …)` form;
//! tests must always use it. The convenience forms resolve `home` via
//! [`home`].

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::types::UserName;

/// Name of the data directory under the home directory.
pub const ROOT_DIR: &str = ".mydashboard";

/// `<home>/.mydashboard/` — pure, no I/O.
pub fn root_at(home: &Path) -> PathBuf {
    home.join(ROOT_DIR)
}

/// `<home>/.mydashboard/components.yaml` — pure, no I/O.
pub fn manifest_path_at(home: &Path) -> PathBuf {
    root_at(home).join("components.yaml")
}

/// `<home>/.mydashboard/users/` — pure, no I/O.
pub fn users_dir_at(home: &Path) -> PathBuf {
    root_at(home).join("users")
}

/// `<home>/.mydashboard/users/<user>.yaml`.
///
/// Fails with [`StoreError::InvalidUserName`] when the name cannot be used as
/// a file name.
pub fn user_config_path_at(home: &Path, user: &UserName) -> Result<PathBuf, StoreError> {
    validate_user_name(user)?;
    Ok(users_dir_at(home).join(format!("{}.yaml", user.0)))
}

/// The current user's home directory.
pub fn home() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeNotFound)
}

/// Reject names that are empty or would escape the users directory.
pub fn validate_user_name(user: &UserName) -> Result<(), StoreError> {
    let name = user.as_str();
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidUserName(name.to_owned()));
    }
    Ok(())
}

#[cfg(unix)]
pub(crate) fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| crate::error::io_err(path, e))
}
#[cfg(not(unix))]
pub(crate) fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
pub(crate) fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| crate::error::io_err(path, e))
}
#[cfg(not(unix))]
pub(crate) fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

/// Create `dir` (mode `0700`) if it does not yet exist.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| crate::error::io_err(dir, e))?;
        set_dir_permissions(dir)?;
    }
    Ok(())
}

/// Atomically write `contents` to `path`.
///
/// Write flow: `.tmp` sibling → `chmod 0600` → `rename`. The `.tmp` file lives
/// in the same directory as the target so the rename never crosses filesystems.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let Some(dir) = path.parent() else {
        return Err(crate::error::io_err(
            path,
            std::io::Error::other("path has no parent directory"),
        ));
    };
    ensure_dir(dir)?;
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, contents).map_err(|e| crate::error::io_err(&tmp, e))?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, path).map_err(|e| crate::error::io_err(path, e))?;
    Ok(())
}
