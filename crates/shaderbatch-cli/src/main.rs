//! `generate-compile-shaders`, see the [`shaderbatch`] crate.

use clap::Parser as _;
use shaderbatch::{cli::expand_short_flags, Cli};

/// Status for failures after the arguments were accepted. Usage errors exit through clap with 2.
const FAILURE_EXIT_CODE: i32 = 1;

fn main() {
    // warnings, such as artifact name collisions, are shown unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(error) = run() {
        log::debug!("exiting with error: {error:?}");
        #[expect(clippy::print_stderr, reason = "the error is the program's final output")]
        {
            eprintln!("{}", report(&error));
        }
        std::process::exit(FAILURE_EXIT_CODE);
    }
}

/// Parses the command line, which exits on usage errors, then generates the script.
fn run() -> anyhow::Result<()> {
    let args = expand_short_flags(std::env::args_os());
    let cli = Cli::parse_from(args);
    cli.run()
}

/// The final line printed for a failed run: the whole error chain, outermost first.
fn report(error: &anyhow::Error) -> String {
    format!("error: {error:#}")
}
