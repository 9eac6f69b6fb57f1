//! CLI command handlers. Each command is in its own file.

mod completions;
mod grades;
mod login;
mod probe;
mod shell;
mod stats;
mod students;
mod username;

pub use completions::run_completions;
pub use grades::run_grades;
pub use login::{login_chained, login_with, run_login};
pub use probe::run_probe;
pub use shell::run_shell;
pub use stats::run_stats;
pub use students::run_students;
pub use username::run_username;
