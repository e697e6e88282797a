use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "juremy-push")]
#[command(about = "Push translation searches to the Juremy lookup app")]
#[command(version)]
pub struct Args {
    /// Juremy server URL (default: https://juremy.com)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging (overridden by JUREMY_PUSH_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the Juremy app token and test the connection
    Configure {
        /// App token (prompted for if not given)
        #[arg(long)]
        token: Option<String>,

        /// Use the token for this run only, without saving it
        #[arg(long)]
        temporary: bool,

        /// Show current configuration
        #[arg(long, conflicts_with_all = ["token", "temporary"])]
        show: bool,
    },
    /// Push a search to the Juremy app
    Search {
        /// Source language code (e.g., EN)
        #[arg(short = 'f', long = "from")]
        from: String,

        /// Target language code (e.g., HU)
        #[arg(short = 't', long = "to")]
        to: String,

        /// Text to search for
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// File with the text to search for (reads from stdin if neither is given)
        file: Option<String>,
    },
    /// List supported language codes
    Languages,
}
