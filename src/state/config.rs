use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use fs_err::File;

use crate::errors::{Handle, Result};

/// Location of the optional configuration file, relative to the project home
pub const DEFAULT_CONFIG_PATH: &str = "config/snorkel-env.conf";

// Represents the settings for the initializer, all of which can be configured by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    // Subdirectory of the project home added to both search paths
    pub library_directory: String,
    // Directory under the user's home added to the module search path
    pub tools_directory: String,
    // Name shown in the home directory status line
    pub project_name: String,
    // Whether the status lines are printed at all
    pub status_messages: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            library_directory: String::from("treedlib"),
            tools_directory: String::from("bmb-tools"),
            project_name: String::from("Snorkel"),
            status_messages: true,
        }
    }
}

impl Configuration {
    /// Loads the configuration for a run
    /// An explicitly requested file must exist, while the default location is optional
    pub fn load(explicit: Option<&Path>, home: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = home.join(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    log::debug!("No configuration file at {}", default_path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    // Scans a configuration file for settings and updates the configuration accordingly
    pub fn from_file(filename: &Path) -> Result<Self> {
        let filename = PathBuf::from(filename);
        log::debug!("Reading configuration from {}", filename.display());

        let file = File::open(&filename)
            .replace_err(|| state_err!(FailedToOpenConfigFile(filename.clone())))?;
        let reader = BufReader::new(file);

        let mut config = Self::default();
        for line in reader.lines() {
            let line = line.replace_err(|| state_err!(FailedToReadConfigFile(filename.clone())))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(": ") else {
                return Err(state_err!(FailedToReadConfigFile(filename)));
            };

            config.set(key.trim(), value.trim())?;
        }

        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "library-directory" => self.library_directory = non_empty(key, value)?,
            "tools-directory" => self.tools_directory = non_empty(key, value)?,
            "project-name" => self.project_name = non_empty(key, value)?,
            "status-messages" => {
                self.status_messages = value.parse::<bool>().replace_err_with_msg(
                    || state_err!(InvalidConfigValue(value.to_owned())),
                    &format!("Expected true or false for '{}', found '{}'", key, value),
                )?;
            }
            _ => {
                return Err(state_err!(InvalidConfigValue(key.to_owned()))
                    .set_context(&format!("Unknown configuration key: {}", key)))
            }
        }

        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        Err(state_err!(InvalidConfigValue(key.to_owned())))
    } else {
        Ok(value.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snorkel-env.conf");
        fs_err::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_match_snorkel_layout() {
        let config = Configuration::default();
        assert_eq!(config.library_directory, "treedlib");
        assert_eq!(config.tools_directory, "bmb-tools");
        assert_eq!(config.project_name, "Snorkel");
        assert!(config.status_messages);
    }

    #[test]
    fn reads_all_keys() {
        let (_dir, path) = write_config(
            "# local layout\nlibrary-directory: vendor/treedlib\n\ntools-directory: tools\nproject-name: Fonduer\nstatus-messages: false\n",
        );

        let config = Configuration::from_file(&path).unwrap();
        assert_eq!(config.library_directory, "vendor/treedlib");
        assert_eq!(config.tools_directory, "tools");
        assert_eq!(config.project_name, "Fonduer");
        assert!(!config.status_messages);
    }

    #[test]
    fn rejects_unknown_key() {
        let (_dir, path) = write_config("history-limit: 10\n");

        let error = Configuration::from_file(&path).unwrap_err();
        assert_eq!(error.to_string(), "Unknown configuration key: history-limit");
    }

    #[test]
    fn rejects_malformed_line() {
        let (_dir, path) = write_config("library-directory treedlib\n");
        assert!(Configuration::from_file(&path).is_err());
    }

    #[test]
    fn rejects_non_boolean_status_flag() {
        let (_dir, path) = write_config("status-messages: sometimes\n");

        let error = Configuration::from_file(&path).unwrap_err();
        assert!(error.to_string().contains("sometimes"));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(None, dir.path()).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn default_file_is_picked_up_from_home() {
        let dir = tempfile::tempdir().unwrap();
        fs_err::create_dir(dir.path().join("config")).unwrap();
        fs_err::write(dir.path().join(DEFAULT_CONFIG_PATH), "tools-directory: kit\n").unwrap();

        let config = Configuration::load(None, dir.path()).unwrap();
        assert_eq!(config.tools_directory, "kit");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.conf");
        assert!(Configuration::load(Some(&missing), dir.path()).is_err());
    }
}
