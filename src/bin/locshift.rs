use clap::Parser;
use colored::Colorize;
use locshift_core::cli::{self, Cli};
use locshift_core::exit::LocshiftExit;
use locshift_core::logging;

fn main() -> LocshiftExit {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, cli.config.as_deref())
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(LocshiftExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            LocshiftExit::from_error(&e)
        }
    }
}
