//! `gradebook students ...` – list, add, update and delete students.

use anyhow::Result;
use gradebook_core::console::{StudentEditForm, StudentForm};
use gradebook_core::http::Transport;
use gradebook_core::{Command, Console};

use super::login_with;
use crate::cli::render::render_view;
use crate::cli::{Credentials, StudentsCommand};

pub fn run_students<T: Transport>(
    console: &mut Console<T>,
    creds: &Credentials,
    action: StudentsCommand,
) -> Result<()> {
    let command = match action {
        StudentsCommand::List => {
            // Listing works without a session; log in only when credentials are given.
            if creds.username.is_some() {
                login_with(console, creds)?;
            }
            Command::ListStudents
        }
        StudentsCommand::Add {
            name,
            student_id,
            email,
            new_password,
        } => {
            login_with(console, creds)?;
            Command::AddStudent(StudentForm {
                name,
                student_id,
                email,
                password: new_password,
            })
        }
        StudentsCommand::Update {
            id,
            name,
            student_id,
            email,
            new_password,
        } => {
            login_with(console, creds)?;
            Command::UpdateStudent(StudentEditForm {
                id,
                name,
                student_id,
                email,
                password: new_password.unwrap_or_default(),
            })
        }
        StudentsCommand::Delete { id, yes } => {
            if !yes {
                anyhow::bail!("refusing to delete student {id} without --yes");
            }
            login_with(console, creds)?;
            Command::DeleteStudent { id, confirmed: yes }
        }
    };
    let view = console.dispatch(command)?;
    print!("{}", render_view(&view));
    Ok(())
}
