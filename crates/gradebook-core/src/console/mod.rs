//! Command dispatcher.
//!
//! A [`Console`] owns the optional [`Session`] and the service URL. Each
//! user action is a [`Command`]; [`Console::dispatch`] runs it against the
//! current session and returns a typed [`View`]. Login is the only action
//! that chains further requests.

mod grades;
mod input;
mod statistics;
mod students;

pub use grades::{add_grade, grades_by_id, grades_by_username, my_grades};
pub use input::{GradeForm, LoginForm, StudentEditForm, StudentForm, MIN_PASSWORD_LEN};
pub use statistics::load_statistics;
pub use students::{add_student, delete_student, list_students, update_student};

use crate::api::{ApiClient, ConnectionStatus};
use crate::config::{resolve_api_url, ConsoleConfig};
use crate::error::ConsoleError;
use crate::http::{CurlTransport, Transport};
use crate::session::Session;
use crate::username::derive_username;
use crate::view::{LoginView, Notice, View};

/// Every user-triggerable action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Probe,
    Login(LoginForm),
    Logout,
    ListStudents,
    AddStudent(StudentForm),
    UpdateStudent(StudentEditForm),
    DeleteStudent { id: i64, confirmed: bool },
    AddGrade(GradeForm),
    MyGrades,
    GradesByUsername(String),
    GradesById(i64),
    Statistics { subject: Option<String> },
    DeriveUsername(String),
}

pub struct Console<T: Transport> {
    config: ConsoleConfig,
    api_url: String,
    transport: T,
    session: Option<Session>,
    connection: Option<ConnectionStatus>,
}

impl Console<CurlTransport> {
    /// Console over libcurl, honouring the configured connect timeout.
    pub fn from_config(config: ConsoleConfig) -> Self {
        let transport = CurlTransport::new(config.connect_timeout());
        Self::new(config, transport)
    }
}

impl<T: Transport> Console<T> {
    pub fn new(config: ConsoleConfig, transport: T) -> Self {
        let api_url = config.effective_api_url().to_string();
        Self {
            config,
            api_url,
            transport,
            session: None,
            connection: None,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Result of the most recent connectivity probe, if any ran.
    pub fn connection(&self) -> Option<ConnectionStatus> {
        self.connection
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_api_url(&mut self, raw: &str) {
        self.api_url = resolve_api_url(raw).to_string();
    }

    fn api(&self) -> Result<ApiClient<'_, T>, ConsoleError> {
        ApiClient::new(&self.api_url, &self.transport)
    }

    /// Checks that the service is reachable and remembers the answer.
    pub fn probe(&mut self) -> ConnectionStatus {
        let status = match self.api() {
            Ok(api) => api.probe(),
            Err(e) => {
                tracing::warn!("probe skipped: {}", e);
                ConnectionStatus::Disconnected
            }
        };
        tracing::debug!(?status, url = %self.api_url, "connectivity probe");
        self.connection = Some(status);
        status
    }

    /// Logs in without any follow-up request and installs the session.
    ///
    /// The form's service URL replaces the current one before validation.
    /// On a transport failure the probe runs again and the error is returned.
    pub fn authenticate(&mut self, form: &LoginForm) -> Result<Session, ConsoleError> {
        self.set_api_url(&form.api_url);
        let (username, password) = form.validate()?;

        let role = match self.api().and_then(|api| api.login(username, password)) {
            Ok(role) => role,
            Err(ConsoleError::Transport(detail)) => {
                self.probe();
                return Err(ConsoleError::Connection(detail));
            }
            Err(e) => return Err(e),
        };

        let session = Session::new(username, role);
        tracing::info!(username = %session.username(), role = %session.role(), "logged in");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Logs in and runs the post-login refreshes: probe, student list for
    /// Admin, own grades for Student, then statistics.
    pub fn login(&mut self, form: &LoginForm) -> Result<LoginView, ConsoleError> {
        let session = self.authenticate(form)?;

        let connection = self.probe();
        let api = self.api()?;
        let role = session.role().clone();
        let students = role
            .is_elevated()
            .then(|| list_students(&api, Some(&session)));
        let own_grades = role
            .is_restricted()
            .then(|| my_grades(&api, Some(&session)));
        let statistics = load_statistics(&api, None);

        Ok(LoginView {
            username: session.display_name().to_string(),
            role,
            notice: Notice::success("Login successful!").with_ttl(self.config.notice_ttl()),
            connection,
            students,
            my_grades: own_grades,
            statistics,
        })
    }

    /// Drops the session. The service is not contacted.
    pub fn logout(&mut self) {
        if let Some(s) = self.session.take() {
            tracing::info!(username = %s.username(), "logged out");
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<View, ConsoleError> {
        tracing::debug!(?command, "dispatch");
        let view = match command {
            Command::Probe => View::Connection(self.probe()),
            Command::Login(form) => View::Login(Box::new(self.login(&form)?)),
            Command::Logout => {
                self.logout();
                View::LoggedOut
            }
            Command::DeriveUsername(name) => View::Username {
                username: derive_username(&name),
                name,
            },
            Command::ListStudents => View::Students(list_students(&self.api()?, self.session())?),
            Command::AddStudent(form) => {
                View::StudentChanged(add_student(&self.api()?, self.session(), &form)?)
            }
            Command::UpdateStudent(form) => {
                View::StudentChanged(update_student(&self.api()?, self.session(), &form)?)
            }
            Command::DeleteStudent { id, confirmed } => View::StudentChanged(delete_student(
                &self.api()?,
                self.session(),
                id,
                confirmed,
            )?),
            Command::AddGrade(form) => {
                View::GradeAdded(add_grade(&self.api()?, self.session(), &form)?)
            }
            Command::MyGrades => View::Grades(my_grades(&self.api()?, self.session())?),
            Command::GradesByUsername(username) => View::Grades(grades_by_username(
                &self.api()?,
                self.session(),
                &username,
            )?),
            Command::GradesById(id) => View::Grades(grades_by_id(&self.api()?, id)?),
            Command::Statistics { subject } => {
                View::Statistics(load_statistics(&self.api()?, subject.as_deref())?)
            }
        };
        Ok(apply_notice_ttl(view, self.config.notice_ttl()))
    }
}

fn apply_notice_ttl(view: View, ttl: std::time::Duration) -> View {
    match view {
        View::StudentChanged(mut change) => {
            change.notice = change.notice.with_ttl(ttl);
            View::StudentChanged(change)
        }
        View::GradeAdded(notice) => View::GradeAdded(notice.with_ttl(ttl)),
        other => other,
    }
}

#[cfg(test)]
mod tests;
