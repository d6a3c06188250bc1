mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, decide, resolve};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbosity())?;

    match commands.command {
        Commands::Check { config } => {
            print::header("validating pricing config");
            check::check(&config)
        }
        Commands::Resolve { config, price } => {
            print::header("resolving price band");
            resolve::resolve(&config, price)
        }
        Commands::Decide(args) => {
            print::header("evaluating price cuts");
            decide::decide(args).await
        }
    }
}
