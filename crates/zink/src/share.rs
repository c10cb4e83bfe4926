use crate::notify::notify;
use crate::platform::TerminalShare;
use crate::prelude::{eprintln, println, *};
use zink_core::bridge::{share, ShareOutcome, SharePayload};
use zink_core::notice::Notice;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShareOptions {
    /// Address where zink can be found
    #[arg(long, env = "ZINK_SHARE_URL")]
    pub url: String,
}

pub async fn run(options: ShareOptions, global: crate::Global) -> Result<()> {
    let payload = SharePayload::for_tool(options.url);

    if global.verbose {
        eprintln!("Title: {}", payload.title);
        eprintln!("Text: {}", payload.text);
        eprintln!("URL: {}", payload.url);
    }

    let outcome = share(&TerminalShare, &payload).await;
    log::debug!("Share finished with {outcome:?}");
    notify(&Notice::share(outcome));

    // Without a share sheet, leave something the user can paste
    if outcome == ShareOutcome::Unsupported {
        println!("{} {}", payload.text, payload.url);
    }

    Ok(())
}
