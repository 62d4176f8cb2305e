use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use rhsa_report::application::{run, Args};
use simple_logger::SimpleLogger;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("Unable to initialize the logger: {}", e);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let stdout = io::stdout();
    let status = run(&args, &mut stdin.lock(), interactive, &mut stdout.lock());
    ExitCode::from(status)
}
