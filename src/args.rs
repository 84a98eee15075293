use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::state::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "snorkel-env",
    version,
    about = "Prepares the environment variables for working with a Snorkel checkout"
)]
pub struct Cli {
    #[arg(short = 'c', long = "config", global = true, help = "Path to a configuration file")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "home",
        global = true,
        help = "Use this directory as the project home instead of the initializer's own directory"
    )]
    pub home: Option<PathBuf>,
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity"
    )]
    pub verbose: u8,
    #[arg(short = 'q', long = "quiet", global = true, help = "Only log errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    #[command(about = "Print the status lines (default)")]
    Show,
    #[command(about = "Print the computed variables as NAME=value lines")]
    Env,
    #[command(about = "Print a shell script that exports the variables when evaluated")]
    Export(ExportArgs),
    #[command(about = "Run a command with the variables applied")]
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(
        short = 's',
        long = "shell",
        value_enum,
        help = "Shell dialect to print (detected from $SHELL by default)"
    )]
    pub shell: Option<Shell>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(long = "announce", help = "Print the status lines before starting the command")]
    pub announce: bool,
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "The program to run, followed by its arguments"
    )]
    pub command: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["snorkel-env"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn run_keeps_hyphenated_arguments() {
        let cli = Cli::try_parse_from(["snorkel-env", "run", "python", "-B", "train.py"]).unwrap();
        match cli.command {
            Some(CliCommand::Run(args)) => assert_eq!(args.command, ["python", "-B", "train.py"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn run_requires_a_program() {
        assert!(Cli::try_parse_from(["snorkel-env", "run"]).is_err());
    }

    #[test]
    fn export_shell_is_parsed() {
        let cli = Cli::try_parse_from(["snorkel-env", "-vv", "export", "--shell", "fish"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(CliCommand::Export(args)) => assert_eq!(args.shell, Some(Shell::Fish)),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
