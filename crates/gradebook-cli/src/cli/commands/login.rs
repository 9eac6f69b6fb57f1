//! `gradebook login` – log in and show what the session loads.

use anyhow::{bail, Result};
use gradebook_core::console::LoginForm;
use gradebook_core::http::Transport;
use gradebook_core::view::LoginView;
use gradebook_core::Console;

use crate::cli::render::render_login;
use crate::cli::Credentials;

fn login_form<T: Transport>(console: &Console<T>, creds: &Credentials) -> Result<LoginForm> {
    let (Some(username), Some(password)) = (&creds.username, &creds.password) else {
        bail!("this command needs --username and --password (or GRADEBOOK_USERNAME / GRADEBOOK_PASSWORD)");
    };
    Ok(LoginForm {
        api_url: console.api_url().to_string(),
        username: username.clone(),
        password: password.clone(),
    })
}

/// Opens a session for a one-shot command: a single login request, no refreshes.
pub fn login_with<T: Transport>(console: &mut Console<T>, creds: &Credentials) -> Result<()> {
    let form = login_form(console, creds)?;
    console.authenticate(&form)?;
    Ok(())
}

/// Full login with the student list, own grades and statistics loaded.
pub fn login_chained<T: Transport>(
    console: &mut Console<T>,
    creds: &Credentials,
) -> Result<LoginView> {
    let form = login_form(console, creds)?;
    Ok(console.login(&form)?)
}

pub fn run_login<T: Transport>(console: &mut Console<T>, creds: &Credentials) -> Result<()> {
    let view = login_chained(console, creds)?;
    print!("{}", render_login(&view));
    Ok(())
}
