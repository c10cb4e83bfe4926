use crate::prelude::{eprintln, f};
use colored::Colorize;
use zink_core::notice::{Level, Notice};

/// Print a notice to stderr, keeping stdout free for links and JSON
pub fn notify(notice: &Notice) {
    let title = match notice.level {
        Level::Success => f!("✔ {}", notice.title).green().bold(),
        Level::Error => f!("✖ {}", notice.title).red().bold(),
        Level::Info => f!("ℹ {}", notice.title).cyan().bold(),
    };

    eprintln!("{title}");
    if let Some(description) = &notice.description {
        eprintln!("  {}", description.dimmed());
    }
}
