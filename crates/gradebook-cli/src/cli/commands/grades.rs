//! `gradebook grades ...` – record grades and look up reports.

use anyhow::Result;
use gradebook_core::console::GradeForm;
use gradebook_core::http::Transport;
use gradebook_core::{Command, Console};

use super::login_with;
use crate::cli::render::render_view;
use crate::cli::{Credentials, GradesCommand};

pub fn run_grades<T: Transport>(
    console: &mut Console<T>,
    creds: &Credentials,
    action: GradesCommand,
) -> Result<()> {
    let command = match action {
        GradesCommand::Add {
            student_id,
            subject,
            score,
            max_score,
        } => {
            login_with(console, creds)?;
            Command::AddGrade(GradeForm {
                student_id,
                subject,
                score,
                max_score,
            })
        }
        GradesCommand::Mine => {
            login_with(console, creds)?;
            Command::MyGrades
        }
        GradesCommand::User { username } => {
            login_with(console, creds)?;
            Command::GradesByUsername(username)
        }
        // Lookup by id is unauthenticated.
        GradesCommand::Id { id } => Command::GradesById(id),
    };
    let view = console.dispatch(command)?;
    print!("{}", render_view(&view));
    Ok(())
}
