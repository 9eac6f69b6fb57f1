//! `gradebook username <name>` – show the username the service derives.

use anyhow::Result;
use gradebook_core::http::Transport;
use gradebook_core::{Command, Console};

use crate::cli::render::render_view;

pub fn run_username<T: Transport>(console: &mut Console<T>, name: &str) -> Result<()> {
    let view = console.dispatch(Command::DeriveUsername(name.to_string()))?;
    print!("{}", render_view(&view));
    Ok(())
}
