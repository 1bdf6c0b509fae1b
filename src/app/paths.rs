// SPDX-License-Identifier: MPL-2.0
//! Where settings and client state live on disk.
//!
//! # Resolution Order
//!
//! 1. Explicit override passed to a `_with_override()` function (tests)
//! 2. CLI arguments `--data-dir` / `--config-dir`, set via [`init_cli_overrides`]
//! 3. Environment variables `ALBUM_LENS_DATA_DIR` / `ALBUM_LENS_CONFIG_DIR`
//! 4. Platform default from the `dirs` crate, with the app name appended

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "AlbumLens";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "ALBUM_LENS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ALBUM_LENS_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the directory overrides given on the command line.
///
/// Later calls are ignored; the first value wins for the life of the process.
pub fn init_cli_overrides(data_dir: Option<PathBuf>, config_dir: Option<PathBuf>) {
    if CLI_DATA_DIR.set(data_dir).is_err() || CLI_CONFIG_DIR.set(config_dir).is_err() {
        tracing::debug!("directory overrides already initialized");
    }
}

/// Directory for client state (the stored session token, recent folders).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        CLI_DATA_DIR.get().and_then(Clone::clone),
        ENV_DATA_DIR,
        dirs::data_dir,
    )
}

/// Directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        CLI_CONFIG_DIR.get().and_then(Clone::clone),
        ENV_CONFIG_DIR,
        dirs::config_dir,
    )
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env_key: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path.or(cli) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_key) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process-wide environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_override_wins_over_environment() {
        let _lock = ENV_MUTEX.lock().expect("env lock");
        std::env::set_var(ENV_DATA_DIR, "/from/env");

        let path = get_app_data_dir_with_override(Some(PathBuf::from("/explicit")));
        assert_eq!(path, Some(PathBuf::from("/explicit")));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn environment_variable_is_used_when_set() {
        let _lock = ENV_MUTEX.lock().expect("env lock");
        std::env::set_var(ENV_CONFIG_DIR, "/from/env/config");

        assert_eq!(
            get_app_config_dir_with_override(None),
            Some(PathBuf::from("/from/env/config"))
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_environment_variable_is_ignored() {
        let _lock = ENV_MUTEX.lock().expect("env lock");
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(path) = get_app_data_dir_with_override(None) {
            assert!(path.ends_with(APP_NAME));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }
}
