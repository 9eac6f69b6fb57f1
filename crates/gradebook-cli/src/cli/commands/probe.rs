//! `gradebook probe` – check that the service answers.

use anyhow::Result;
use gradebook_core::http::Transport;
use gradebook_core::Console;

use crate::cli::render::render_connection;

pub fn run_probe<T: Transport>(console: &mut Console<T>) -> Result<()> {
    let status = console.probe();
    print!("{}", render_connection(status));
    if !status.is_connected() {
        anyhow::bail!("service at {} is not reachable", console.api_url());
    }
    Ok(())
}
