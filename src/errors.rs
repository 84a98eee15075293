use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// `Result` alias which automatically uses `SetupError` as the error type.
pub type Result<T> = std::result::Result<T, SetupError>;

pub trait Handle<T> {
    /// Replaces any error kind with a new one, without overriding the default error message.
    fn replace_err(self, new_error: impl FnOnce() -> SetupError) -> Result<T>;
    /// Replaces any error kind with a new one, overriding the default error message with the
    /// provided one. Useful in situations where additional context can provide additional clarity.
    fn replace_err_with_msg(
        self,
        new_error: impl FnOnce() -> SetupError,
        context: &str,
    ) -> Result<T>;
}

impl<T, E> Handle<T> for std::result::Result<T, E> {
    fn replace_err(self, new_error: impl FnOnce() -> SetupError) -> Result<T> {
        self.map_err(|_| new_error())
    }

    fn replace_err_with_msg(
        self,
        new_error: impl FnOnce() -> SetupError,
        context: &str,
    ) -> Result<T> {
        self.map_err(|_| new_error().set_context(context))
    }
}

impl<T> Handle<T> for Option<T> {
    fn replace_err(self, new_error: impl FnOnce() -> SetupError) -> Result<T> {
        self.ok_or_else(new_error)
    }

    fn replace_err_with_msg(
        self,
        new_error: impl FnOnce() -> SetupError,
        context: &str,
    ) -> Result<T> {
        self.ok_or_else(|| new_error().set_context(context))
    }
}

/// Error type for the initializer.
/// Contains an error kind and optionally a custom message,
/// which is used to override the default error message.
pub struct SetupError {
    kind: ErrorKind,
    custom_message: Option<String>,
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // If the error has a custom message, use it instead of the default error message.
        match &self.custom_message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Debug for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}

impl std::error::Error for SetupError {}

impl SetupError {
    /// Creates a `SetupError` with no custom message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            custom_message: None,
        }
    }

    /// Takes a `SetupError` and gives it a custom message.
    pub fn set_context(mut self, context: &str) -> Self {
        self.custom_message = Some(context.to_owned());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Enum representing every type of error which can occur while preparing the environment.
#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Executable(#[from] ExecutableError),
}

/// Error type for failures to establish where the project lives.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Could not resolve the location of the initializer: {0}")]
    CannotResolveLocation(PathBuf),
    #[error("Project home is not valid unicode: {0}")]
    NonUnicodeHome(PathBuf),
}

/// Error type for errors which occur while loading settings.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Failed to open configuration file: {0}")]
    FailedToOpenConfigFile(PathBuf),
    #[error("Failed to read configuration file: {0}")]
    FailedToReadConfigFile(PathBuf),
    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Error type for errors which occur while running a command with the prepared environment.
#[derive(Error, Debug)]
pub enum ExecutableError {
    #[error("Could not start command: {0}")]
    CouldNotSpawn(String),
    #[error("Command failed with exit code: {0}")]
    FailedToExecute(i32),
}

/// Shortcut for creating a `SetupError::Configuration` without explicit imports
macro_rules! config_err {
    ($content:expr) => {{
        use crate::errors::ConfigurationError::*;
        use crate::errors::ErrorKind;
        use crate::errors::SetupError;
        SetupError::new(ErrorKind::Configuration($content))
    }};
}

/// Shortcut for creating a `SetupError::State` without explicit imports
macro_rules! state_err {
    ($content:expr) => {{
        use crate::errors::ErrorKind;
        use crate::errors::SetupError;
        use crate::errors::StateError::*;
        SetupError::new(ErrorKind::State($content))
    }};
}

/// Shortcut for creating a `SetupError::Executable` without explicit imports
macro_rules! executable_err {
    ($content:expr) => {{
        use crate::errors::ErrorKind;
        use crate::errors::ExecutableError::*;
        use crate::errors::SetupError;
        SetupError::new(ErrorKind::Executable($content))
    }};
}
