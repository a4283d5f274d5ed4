/*
 * Locates the per-user directory holding the picker's configuration file.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * Returns the platform-local (non-roaming) configuration directory for
 * `app_name`, creating it when missing. `None` if the platform offers no such
 * directory or it cannot be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    let config_path = proj_dirs.config_local_dir();
    if !config_path.exists() {
        if let Err(e) = fs::create_dir_all(config_path) {
            log::error!("PathUtils: Failed to create config directory {config_path:?}: {e}");
            return None;
        }
        log::debug!("PathUtils: Created config directory {config_path:?}");
    }
    Some(config_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_created_and_stable() {
        let unique_app_name = format!("TestApp_CategoryPicker_{}", rand::random::<u128>());

        let first = get_base_app_config_local_dir(&unique_app_name);
        let Some(first) = first else {
            // No home directory in this environment; nothing to verify.
            return;
        };
        assert!(first.is_dir());
        assert!(
            first
                .to_string_lossy()
                .to_lowercase()
                .contains(&unique_app_name.to_lowercase())
        );
        assert_eq!(get_base_app_config_local_dir(&unique_app_name), Some(first.clone()));

        if let Err(e) = fs::remove_dir_all(&first) {
            eprintln!("Test cleanup failed for {first:?}: {e}");
        }
    }
}
