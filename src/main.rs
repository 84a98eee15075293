#[macro_use]
mod errors;
mod args;
mod exec;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;
use log::LevelFilter;

use args::{Cli, CliCommand};
use errors::{ErrorKind, ExecutableError, Handle, SetupError};
use exec::Executable;
use state::{initialize_environment, EnvironmentPlan, EnvironmentSnapshot, HomeSource, Shell};

/// Shown in place of the initializer path when the running executable cannot be found
const INITIALIZER: &str = "<current executable>";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_log(log_level(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e),
    }
}

fn run(cli: Cli) -> Result<()> {
    let plan = prepare(&cli)?;

    match cli.command.unwrap_or(CliCommand::Show) {
        CliCommand::Show => print_status(&plan),
        CliCommand::Env => {
            for (var, value) in plan.assignments() {
                println!("{}={}", var, value);
            }
        }
        CliCommand::Export(args) => {
            let shell = args
                .shell
                .unwrap_or_else(|| Shell::detect(std::env::var("SHELL").ok().as_deref()));
            print!("{}", shell.render(&plan));
        }
        CliCommand::Run(args) => {
            if args.announce {
                print_status(&plan);
            }

            let mut command = args.command.into_iter();
            // clap guarantees at least one value
            let program = command.next().unwrap_or_default();
            Executable::new(program, command.collect()).run(&plan)?;
        }
    }

    Ok(())
}

// Computes the plan from the caller's environment, anchored at the running executable
fn prepare(cli: &Cli) -> Result<EnvironmentPlan> {
    let snapshot = EnvironmentSnapshot::from_process();
    let config_file = cli.config.as_deref();

    let plan = match &cli.home {
        Some(directory) => {
            initialize_environment(HomeSource::Override(directory), &snapshot, config_file)?
        }
        None => {
            let initializer = std::env::current_exe()
                .replace_err(|| config_err!(CannotResolveLocation(PathBuf::from(INITIALIZER))))?;
            log::debug!("Initializer located at {}", initializer.display());
            initialize_environment(HomeSource::Initializer(&initializer), &snapshot, config_file)?
        }
    };

    Ok(plan)
}

fn print_status(plan: &EnvironmentPlan) {
    for line in plan.status_lines() {
        println!("{}", line);
    }
}

// Prints an appropriate error message for the given error, if applicable
fn handle_error(error: anyhow::Error) -> ExitCode {
    if let Some(setup_error) = error.downcast_ref::<SetupError>() {
        // A failing child has already reported its own problem
        if let ErrorKind::Executable(ExecutableError::FailedToExecute(code)) = setup_error.kind() {
            log::debug!("Command exited with code {}", code);
            return ExitCode::from(exit_code_byte(*code));
        }
    }

    eprintln!("{} {}", "Error:".red().bold(), error);
    ExitCode::FAILURE
}

fn exit_code_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes log4rs with a single console appender on stderr, keeping stdout for the shell
fn init_log(level: LevelFilter) {
    use log4rs::append::console::{ConsoleAppender, Target};
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})}: {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));

    // Logging is best-effort, the initializer works the same without it
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to configure logging: {}", e),
    }
}
