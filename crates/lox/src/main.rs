use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

mod driver;
mod report;

use driver::{DriverError, Lox, Options, OutputFormat};

/// Exit code for command-line usage errors and unreadable scripts.
const EX_USAGE: i32 = 64;
/// Exit code for scripts that contain lexical errors.
const EX_DATAERR: i32 = 65;
/// Exit code for failures writing output.
const EX_IOERR: i32 = 74;

/// Lox front end.
///
/// Scans a script, or lines typed at a prompt, and prints the tokens.
#[derive(Parser)]
#[command(
    name = "lox",
    version,
    about,
    long_about = "Lox front end.\n\nScans Lox source into tokens and reports every lexical error found.\nWith no script, starts an interactive prompt; an empty line exits.\n\nExamples:\n  lox hello.lox                  Print the tokens of hello.lox\n  lox hello.lox --format json    Print the tokens as JSON\n  lox hello.lox --fancy          Show errors with source snippets\n  lox                            Start the prompt"
)]
struct Cli {
    /// Script to scan. Starts the prompt when omitted.
    script: Option<PathBuf>,

    /// Token output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Render errors as annotated source snippets.
    #[arg(long)]
    fancy: bool,

    /// Disable colors in --fancy output.
    #[arg(long = "no-color")]
    no_color: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print().ok();
            process::exit(EX_USAGE);
        }
    };

    let options = Options {
        format: cli.format,
        fancy: cli.fancy,
        color: !cli.no_color && io::stderr().is_terminal(),
    };
    let mut lox = Lox::new(options, io::stdout().lock(), io::stderr().lock());

    let result = match cli.script {
        Some(ref path) => lox.run_file(path),
        None => lox.run_prompt(io::stdin().lock()),
    };

    if let Some(code) = exit_code(&result, lox.had_error(), cli.script.is_some()) {
        if let Err(e) = result {
            eprintln!("error: {}", e);
        }
        process::exit(code);
    }
}

/// Map the outcome of a run to a process exit code; `None` means success.
///
/// Lexical errors only fail a script run. Prompt lines report theirs and
/// move on.
fn exit_code(result: &Result<(), DriverError>, had_error: bool, is_script: bool) -> Option<i32> {
    match result {
        Err(DriverError::Read { .. }) => Some(EX_USAGE),
        Err(_) => Some(EX_IOERR),
        Ok(()) if is_script && had_error => Some(EX_DATAERR),
        Ok(()) => None,
    }
}
