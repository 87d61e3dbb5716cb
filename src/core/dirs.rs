use crate::core::error::{Result, ViewportMemoryError};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "viewport-memory";

pub fn get_data_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".local/share"))
                    .ok_or(ViewportMemoryError::StorageDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(ViewportMemoryError::StorageDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::data_dir().ok_or(ViewportMemoryError::StorageDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

/// Private storage directory for one workspace, keyed by a hash of its root path.
pub fn get_workspace_directory(workspace_root: &Path) -> Result<PathBuf> {
    let workspace_hash = format!(
        "{:x}",
        md5::compute(workspace_root.to_string_lossy().as_bytes())
    );

    log::debug!("get_workspace_directory: workspace_root = {workspace_root:?}");
    log::debug!("get_workspace_directory: workspace_hash = {workspace_hash:?}");

    Ok(get_data_directory()?.join(workspace_hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_directory_is_stable_and_distinct() -> anyhow::Result<()> {
        let a1 = get_workspace_directory(Path::new("/vaults/a"))?;
        let a2 = get_workspace_directory(Path::new("/vaults/a"))?;
        let b = get_workspace_directory(Path::new("/vaults/b"))?;

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1.to_string_lossy().contains(APP_DIR));
        Ok(())
    }
}
