//! `gradebook stats [--subject S]` – overall or per-subject statistics.

use anyhow::Result;
use gradebook_core::http::Transport;
use gradebook_core::{Command, Console};

use crate::cli::render::render_view;

pub fn run_stats<T: Transport>(console: &mut Console<T>, subject: Option<String>) -> Result<()> {
    let view = console.dispatch(Command::Statistics { subject })?;
    print!("{}", render_view(&view));
    Ok(())
}
