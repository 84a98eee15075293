use std::path::Path;

use clap::ValueEnum;

use super::environment::EnvironmentPlan;

/// Shell dialects a plan can be rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// bash, zsh, sh, dash, ksh
    Posix,
    Fish,
}

impl Shell {
    /// Picks a dialect from the value of `$SHELL`, falling back to POSIX syntax
    pub fn detect(shell_var: Option<&str>) -> Self {
        let name = shell_var
            .map(Path::new)
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str());

        match name {
            Some("fish") => Self::Fish,
            _ => Self::Posix,
        }
    }

    /// Renders a script which, when evaluated by the shell, exports the plan into the current session
    pub fn render(self, plan: &EnvironmentPlan) -> String {
        let mut script = String::new();

        for (var, value) in plan.assignments() {
            let line = match self {
                Self::Posix => format!("export {}={}\n", var, posix_quote(value)),
                Self::Fish => format!("set -gx {} {}\n", var, fish_quote(value)),
            };
            script.push_str(&line);
        }

        for status in plan.status_lines() {
            let quoted = match self {
                Self::Posix => posix_quote(status),
                Self::Fish => fish_quote(status),
            };
            script.push_str(&format!("echo {}\n", quoted));
        }

        script
    }
}

// Single quotes suppress every expansion, so only the quote itself needs escaping
fn posix_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

// Inside fish single quotes, only backslash and single quote are special
fn fish_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', r"\\").replace('\'', r"\'"))
}
