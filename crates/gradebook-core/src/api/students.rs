use super::client::{decode, ApiClient};
use super::message::remote_error;
use super::models::{NewStudent, Student, StudentUpdate};
use crate::error::ConsoleError;
use crate::http::{Method, Transport};
use crate::session::{json_headers, Session};

/// Outcome of the liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn is_connected(self) -> bool {
        self == ConnectionStatus::Connected
    }
}

impl<T: Transport + ?Sized> ApiClient<'_, T> {
    /// `GET /api/students` used as a liveness check. 401 means the service is
    /// up but wants credentials, so it counts as connected.
    pub fn probe(&self) -> ConnectionStatus {
        let url = self.endpoint(&["api", "students"], None);
        match self.get(url, &json_headers()) {
            Ok(r) if r.is_success() || r.status == 401 => ConnectionStatus::Connected,
            Ok(r) => {
                tracing::info!(status = r.status, "probe: service answered with an error");
                ConnectionStatus::Disconnected
            }
            Err(_) => ConnectionStatus::Disconnected,
        }
    }

    /// `GET /api/students`, sent without the session headers.
    pub fn list_students(&self) -> Result<Vec<Student>, ConsoleError> {
        let url = self.endpoint(&["api", "students"], None);
        let response = self.get(url, &json_headers())?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to load students"));
        }
        decode(&response)
    }

    /// `POST /api/students`.
    pub fn create_student(&self, session: &Session, student: &NewStudent) -> Result<(), ConsoleError> {
        let url = self.endpoint(&["api", "students"], None);
        let response = self.send(Method::Post, url, session.auth_headers(), Some(student))?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to add student"));
        }
        Ok(())
    }

    /// `PUT /api/students/{id}`. Any 2xx counts, whatever the body.
    pub fn update_student(
        &self,
        session: &Session,
        id: i64,
        update: &StudentUpdate,
    ) -> Result<(), ConsoleError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "students", &id], None);
        let response = self.send(Method::Put, url, session.auth_headers(), Some(update))?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to update student"));
        }
        Ok(())
    }

    /// `DELETE /api/students/{id}`.
    pub fn delete_student(&self, session: &Session, id: i64) -> Result<(), ConsoleError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "students", &id], None);
        let response = self.send::<()>(Method::Delete, url, session.auth_headers(), None)?;
        if !response.is_success() {
            return Err(remote_error(&response, "Failed to delete student"));
        }
        Ok(())
    }
}
