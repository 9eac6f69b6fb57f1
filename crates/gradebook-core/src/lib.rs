pub mod config;
pub mod logging;

pub mod api;
pub mod console;
pub mod error;
pub mod http;
pub mod session;
pub mod username;
pub mod view;

pub use console::{Command, Console};
pub use error::ConsoleError;
pub use session::{Role, Session};
pub use username::derive_username;
