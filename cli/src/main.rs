use std::process;

use clap::Parser;
use rexreq::logging::setup_logging;
use rexreq::{exitcode, run, Cli};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let code = match run(&cli) {
        Ok(output) => {
            println!("{output}");
            exitcode::OK
        }
        Err(e) => {
            tracing::debug!(error = %e, "request failed");
            eprintln!("{}", e.user_message());
            e.exit_code()
        }
    };
    process::exit(code);
}
