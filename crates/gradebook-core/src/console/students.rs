//! Student management actions.

use super::input::{StudentEditForm, StudentForm};
use crate::api::ApiClient;
use crate::error::ConsoleError;
use crate::http::Transport;
use crate::session::Session;
use crate::username::derive_username;
use crate::view::{Notice, StudentChangeView, StudentListView};

const ADMIN_ONLY: &str = "Student management requires the Admin role";

/// Session allowed to manage students.
pub(crate) fn require_admin(session: Option<&Session>) -> Result<&Session, ConsoleError> {
    let session = session.ok_or(ConsoleError::NotLoggedIn)?;
    if !session.role().is_elevated() {
        return Err(ConsoleError::forbidden(ADMIN_ONLY));
    }
    Ok(session)
}

/// Lists students. The call itself is unauthenticated; only the restricted
/// role is refused.
pub fn list_students<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
) -> Result<StudentListView, ConsoleError> {
    if session.is_some_and(|s| s.role().is_restricted()) {
        return Err(ConsoleError::forbidden(ADMIN_ONLY));
    }
    let students = api.list_students()?;
    tracing::debug!(count = students.len(), "loaded students");
    Ok(StudentListView::from_students(students))
}

pub fn add_student<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
    form: &StudentForm,
) -> Result<StudentChangeView, ConsoleError> {
    let session = require_admin(session)?;
    let student = form.validate()?;
    api.create_student(session, &student)?;
    let username = derive_username(&student.name);
    tracing::info!(student_id = %student.student_id, %username, "student added");
    Ok(StudentChangeView {
        notice: Notice::success(format!(
            "Student added successfully! Username: {username}"
        )),
        students: list_students(api, Some(session)),
    })
}

pub fn update_student<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
    form: &StudentEditForm,
) -> Result<StudentChangeView, ConsoleError> {
    let session = require_admin(session)?;
    let update = form.validate()?;
    api.update_student(session, form.id, &update)?;
    tracing::info!(id = form.id, password_changed = update.password.is_some(), "student updated");
    Ok(StudentChangeView {
        notice: Notice::success("Student updated successfully!"),
        students: list_students(api, Some(session)),
    })
}

/// Deletes a student. `confirmed` is the explicit confirmation gesture.
pub fn delete_student<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
    id: i64,
    confirmed: bool,
) -> Result<StudentChangeView, ConsoleError> {
    let session = require_admin(session)?;
    if !confirmed {
        return Err(ConsoleError::validation("Deletion not confirmed"));
    }
    api.delete_student(session, id)?;
    tracing::info!(id, "student deleted");
    Ok(StudentChangeView {
        notice: Notice::success("Student deleted successfully"),
        students: list_students(api, Some(session)),
    })
}
