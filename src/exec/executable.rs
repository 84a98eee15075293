use std::process::Command as Process;

use crate::errors::{Handle, Result};
use crate::state::EnvironmentPlan;

/// Exit code used when the child was terminated without one, e.g. by a signal
const NO_EXIT_CODE: i32 = 126;

/// Represents an external command to be launched inside the prepared environment
pub struct Executable {
    program: String,
    arguments: Vec<String>,
}

impl Executable {
    pub fn new(program: String, arguments: Vec<String>) -> Self {
        Self { program, arguments }
    }

    // * The variables are set on the child only, the initializer's own environment is left alone
    // * Program lookup uses the planned PATH, so commands in the project home can be run by name
    pub fn run(&self, plan: &EnvironmentPlan) -> Result<()> {
        log::info!(
            "Running '{}' with project home {}",
            self.program,
            plan.home()
        );

        let mut process = Process::new(&self.program)
            .args(&self.arguments)
            .envs(plan.vars())
            .spawn()
            .replace_err(|| executable_err!(CouldNotSpawn(self.program.clone())))?;

        let status = process
            .wait()
            .replace_err(|| executable_err!(CouldNotSpawn(self.program.clone())))?;

        match status.success() {
            true => Ok(()),
            false => Err(executable_err!(FailedToExecute(
                status.code().unwrap_or(NO_EXIT_CODE)
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{ErrorKind, ExecutableError};
    use crate::state::{initialize_environment, EnvironmentSnapshot, HomeSource};

    fn plan() -> (tempfile::TempDir, EnvironmentPlan) {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = EnvironmentSnapshot {
            module_path: None,
            executable_path: Some(String::from("/usr/bin:/bin")),
            user_home: Some(String::from("/home/ada")),
        };

        let plan = initialize_environment(HomeSource::Override(dir.path()), &snapshot, None).unwrap();
        (dir, plan)
    }

    #[test]
    fn child_sees_planned_variables() {
        let (_dir, plan) = plan();
        let check = format!(
            "test \"$SNORKELHOME\" = '{}' && test -n \"$PYTHONPATH\"",
            plan.home()
        );

        let result = Executable::new("sh".to_owned(), vec!["-c".to_owned(), check]).run(&plan);
        assert!(result.is_ok());
    }

    #[test]
    fn exit_code_is_reported() {
        let (_dir, plan) = plan();

        let error = Executable::new("sh".to_owned(), vec!["-c".to_owned(), "exit 3".to_owned()])
            .run(&plan)
            .unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::Executable(ExecutableError::FailedToExecute(3))
        ));
    }

    #[test]
    fn missing_program_cannot_spawn() {
        let (_dir, plan) = plan();

        let error = Executable::new("snorkel-env-no-such-program".to_owned(), Vec::new())
            .run(&plan)
            .unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::Executable(ExecutableError::CouldNotSpawn(_))
        ));
    }
}
