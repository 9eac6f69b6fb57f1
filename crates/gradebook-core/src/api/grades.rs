use super::client::{decode, ApiClient};
use super::message::remote_error;
use super::models::{GradeReport, NewGrade};
use crate::error::ConsoleError;
use crate::http::{HttpResponse, Method, Transport};
use crate::session::{json_headers, Session};

const LOOKUP_FALLBACK: &str = "Student not found or has no grades";

impl<T: Transport + ?Sized> ApiClient<'_, T> {
    /// `POST /api/grades`.
    pub fn add_grade(&self, session: &Session, grade: &NewGrade) -> Result<(), ConsoleError> {
        let url = self.endpoint(&["api", "grades"], None);
        let response = self.send(Method::Post, url, session.auth_headers(), Some(grade))?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to add grade"));
        }
        Ok(())
    }

    /// `GET /api/students/my-grades` for the session's own identity.
    pub fn my_grades(&self, session: &Session) -> Result<GradeReport, ConsoleError> {
        let url = self.endpoint(&["api", "students", "my-grades"], None);
        let response = self.get(url, session.auth_headers())?;
        report(&response, "Failed to load your grades")
    }

    /// `GET /api/students/by-username/{username}/grades`.
    pub fn grades_by_username(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<GradeReport, ConsoleError> {
        let url = self.endpoint(&["api", "students", "by-username", username, "grades"], None);
        let response = self.get(url, session.auth_headers())?;
        report(&response, LOOKUP_FALLBACK)
    }

    /// `GET /api/students/{id}/grades`, sent without the session headers.
    pub fn grades_by_id(&self, id: i64) -> Result<GradeReport, ConsoleError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "students", &id, "grades"], None);
        let response = self.get(url, &json_headers())?;
        report(&response, LOOKUP_FALLBACK)
    }
}

fn report(response: &HttpResponse, fallback: &str) -> Result<GradeReport, ConsoleError> {
    if !response.is_success() {
        return Err(remote_error(response, fallback));
    }
    decode(response)
}
