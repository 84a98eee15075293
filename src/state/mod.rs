mod config;
mod environment;
mod path;
mod shell;

pub use environment::{initialize_environment, EnvironmentPlan, EnvironmentSnapshot, HomeSource};
pub use shell::Shell;
