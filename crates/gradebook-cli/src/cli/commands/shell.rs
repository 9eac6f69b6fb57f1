//! `gradebook shell` – interactive session on stdin/stdout.

use std::io;

use anyhow::Result;
use gradebook_core::http::Transport;
use gradebook_core::view::Notice;
use gradebook_core::Console;

use super::login_chained;
use crate::cli::render::{render_login, render_notice};
use crate::cli::shell::Shell;
use crate::cli::Credentials;

pub fn run_shell<T: Transport>(mut console: Console<T>, creds: &Credentials) -> Result<()> {
    // Credentials from flags or environment log in before the first prompt.
    if creds.username.is_some() && creds.password.is_some() {
        match login_chained(&mut console, creds) {
            Ok(view) => print!("{}", render_login(&view)),
            Err(e) => print!("{}", render_notice(&Notice::error(format!("{e:#}")))),
        }
    }
    let mut shell = Shell::new(console);
    let stdin = io::stdin();
    shell.run(stdin.lock(), &mut io::stdout())
}
