use crate::prelude::*;
use clap::Parser;

mod error;
mod format;
mod generate;
mod interactive;
mod notify;
mod platform;
mod prelude;
mod share;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate WhatsApp (wa.me) links for Brazilian numbers, with prefilled messages and QR codes"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "ZINK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Format a phone number as (DD) DDDDD-DDDD
    Format(crate::format::FormatOptions),

    /// Generate a WhatsApp link with an optional prefilled message
    Generate(crate::generate::GenerateOptions),

    /// Share zink through the platform's native share sheet
    Share(crate::share::ShareOptions),

    /// Build links step by step in an interactive session
    Interactive(crate::interactive::InteractiveOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Format(options) => crate::format::run(options, app.global),
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Share(options) => crate::share::run(options, app.global).await,
        SubCommands::Interactive(options) => crate::interactive::run(options, app.global).await,
    }
}
