use crate::prelude::{eprintln, println, *};
use zink_core::phone::{format_phone, strip_non_digits};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FormatOptions {
    /// Phone number with DDD, in any notation (e.g. "11 99999-8888")
    pub phone: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct FormatOutput {
    pub digits: String,
    pub formatted: String,
}

pub fn run(options: FormatOptions, global: crate::Global) -> Result<()> {
    let output = FormatOutput {
        digits: strip_non_digits(&options.phone),
        formatted: format_phone(&options.phone),
    };

    if global.verbose {
        eprintln!("Digits: {}", output.digits);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.formatted);
    }

    Ok(())
}
