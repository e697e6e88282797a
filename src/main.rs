use anyhow::Result;
use clap::Parser;

use juremy_push::cli::commands::configure::{self, ConfigureOptions};
use juremy_push::cli::commands::languages::print_languages;
use juremy_push::cli::commands::search::{self, SearchOptions};
use juremy_push::cli::{Args, Command};
use juremy_push::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    match args.command {
        Command::Languages => {
            print_languages();
        }
        Command::Configure {
            token,
            temporary,
            show,
        } => {
            let options = ConfigureOptions {
                base_url: args.base_url,
                token,
                temporary,
                show,
            };
            configure::run_configure(options).await?;
        }
        Command::Search {
            from,
            to,
            text,
            file,
        } => {
            let options = SearchOptions {
                base_url: args.base_url,
                from,
                to,
                text,
                file,
            };
            search::run_search(options).await?;
        }
    }

    Ok(())
}
