use std::env;
use std::path::Path;

use strum::{AsRefStr, Display};

use super::config::Configuration;
use super::path::{join_segment, ProjectHome, SearchPath};
use crate::errors::Result;

// Identifier enum for safely accessing environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum EnvVar {
    #[strum(serialize = "SNORKELHOME")]
    ProjectHome,
    #[strum(serialize = "PYTHONPATH")]
    ModulePath,
    #[strum(serialize = "PATH")]
    ExecutablePath,
    #[strum(serialize = "HOME")]
    UserHome,
}

/// The parts of the caller's environment the initializer reads
/// Every value is optional, an unset variable is never an error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    pub module_path: Option<String>,
    pub executable_path: Option<String>,
    pub user_home: Option<String>,
}

impl EnvironmentSnapshot {
    /// Captures the current process environment
    pub fn from_process() -> Self {
        Self {
            module_path: get_caller_env_var(EnvVar::ModulePath),
            executable_path: get_caller_env_var(EnvVar::ExecutablePath),
            user_home: get_caller_env_var(EnvVar::UserHome),
        }
    }
}

/// The result of preparing the environment: the values to export and the messages to show
/// Nothing is applied until a caller decides where the values should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPlan {
    home: ProjectHome,
    assignments: Vec<(EnvVar, String)>,
    status_lines: Vec<String>,
}

impl EnvironmentPlan {
    pub fn home(&self) -> &ProjectHome {
        &self.home
    }

    /// The variables to set, in the order they are computed
    pub fn assignments(&self) -> &[(EnvVar, String)] {
        &self.assignments
    }

    pub fn get(&self, var: EnvVar) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(name, _)| *name == var)
            .map(|(_, value)| value.as_str())
    }

    pub fn status_lines(&self) -> &[String] {
        &self.status_lines
    }

    /// Pairs of variable names and values, suitable for `Command::envs`
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(var, value)| (var.as_ref(), value.as_str()))
    }

    /// Writes the planned values back into a snapshot, as a shell would after sourcing the script
    pub fn apply_to(&self, snapshot: &mut EnvironmentSnapshot) {
        for (var, value) in &self.assignments {
            match var {
                EnvVar::ModulePath => snapshot.module_path = Some(value.clone()),
                EnvVar::ExecutablePath => snapshot.executable_path = Some(value.clone()),
                EnvVar::UserHome => snapshot.user_home = Some(value.clone()),
                EnvVar::ProjectHome => {}
            }
        }
    }
}

/// Where the project home comes from
#[derive(Debug, Clone, Copy)]
pub enum HomeSource<'a> {
    /// The directory containing this file, normally the running executable
    Initializer(&'a Path),
    /// A directory given explicitly by the user
    Override(&'a Path),
}

/// Computes the project environment: resolves the home, loads its configuration and builds the plan
pub fn initialize_environment(
    source: HomeSource,
    snapshot: &EnvironmentSnapshot,
    config_file: Option<&Path>,
) -> Result<EnvironmentPlan> {
    let home = match source {
        HomeSource::Initializer(initializer) => ProjectHome::locate(initializer)?,
        HomeSource::Override(directory) => ProjectHome::from_override(directory)?,
    };
    let config = Configuration::load(config_file, home.path())?;

    Ok(plan_for_home(home, snapshot, &config))
}

/// Computes the project environment once the project home is known
pub fn plan_for_home(
    home: ProjectHome,
    snapshot: &EnvironmentSnapshot,
    config: &Configuration,
) -> EnvironmentPlan {
    log::info!("Project home resolved to {}", home);

    let library = home.join(&config.library_directory);

    let user_home = snapshot.user_home.as_deref().unwrap_or_else(|| {
        log::warn!(
            "{} is not set, the tools directory will be resolved from the filesystem root",
            EnvVar::UserHome
        );
        ""
    });
    let tools = join_segment(user_home, &config.tools_directory);

    let mut module_path = SearchPath::from_prior(snapshot.module_path.as_deref());
    module_path.push(home.to_string());
    module_path.push(library.clone());
    module_path.push(tools);

    let mut executable_path = SearchPath::from_prior(snapshot.executable_path.as_deref());
    executable_path.push(home.to_string());
    executable_path.push(library);

    let assignments = vec![
        (EnvVar::ProjectHome, home.to_string()),
        (EnvVar::ModulePath, module_path.to_string()),
        (EnvVar::ExecutablePath, executable_path.to_string()),
    ];
    for (var, value) in &assignments {
        log::debug!("{}={}", var, value);
    }

    let status_lines = match config.status_messages {
        true => vec![
            format!("{} home directory: {}", config.project_name, home),
            String::from("Environment variables set!"),
        ],
        false => Vec::new(),
    };

    EnvironmentPlan {
        home,
        assignments,
        status_lines,
    }
}

// Gets a variable from the environment the initializer was started in
fn get_caller_env_var(variable: EnvVar) -> Option<String> {
    env::var(variable.as_ref()).ok()
}
