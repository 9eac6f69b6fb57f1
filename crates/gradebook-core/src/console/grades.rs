//! Grade recording and the three grade lookups.

use super::input::GradeForm;
use super::students::require_admin;
use crate::api::ApiClient;
use crate::error::ConsoleError;
use crate::http::Transport;
use crate::session::Session;
use crate::view::{GradeReportView, GradeScope, Notice};

pub fn add_grade<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
    form: &GradeForm,
) -> Result<Notice, ConsoleError> {
    let session = require_admin(session)?;
    let grade = form.validate()?;
    api.add_grade(session, &grade)?;
    tracing::info!(student_id = %grade.student_id, subject = %grade.subject, "grade added");
    Ok(Notice::success("Grade added successfully!"))
}

/// Own grades of a restricted-role session.
pub fn my_grades<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
) -> Result<GradeReportView, ConsoleError> {
    let session = session.ok_or(ConsoleError::NotLoggedIn)?;
    if !session.role().is_restricted() {
        return Err(ConsoleError::forbidden(
            "Only Student accounts have their own grades",
        ));
    }
    let report = api.my_grades(session)?;
    Ok(GradeReportView::new(GradeScope::Mine, report))
}

pub fn grades_by_username<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    session: Option<&Session>,
    username: &str,
) -> Result<GradeReportView, ConsoleError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ConsoleError::validation("Please enter a username"));
    }
    let session = session.ok_or(ConsoleError::NotLoggedIn)?;
    let report = api.grades_by_username(session, username)?;
    Ok(GradeReportView::new(
        GradeScope::ByUsername(username.to_string()),
        report,
    ))
}

/// Lookup by database id; sent without session headers.
pub fn grades_by_id<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    id: i64,
) -> Result<GradeReportView, ConsoleError> {
    let report = api.grades_by_id(id)?;
    Ok(GradeReportView::new(GradeScope::ById(id), report))
}
