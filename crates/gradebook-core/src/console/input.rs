//! Raw form input and its local validation. Every `validate` runs before any
//! request is built; a failure means nothing is sent.

use crate::api::{NewGrade, NewStudent, StudentUpdate};
use crate::error::ConsoleError;

/// Shortest password accepted for a new student.
pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Blank means "use the configured default".
    pub api_url: String,
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Returns the trimmed `(username, password)` pair.
    pub fn validate(&self) -> Result<(&str, &str), ConsoleError> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ConsoleError::validation(
                "Please enter username and password",
            ));
        }
        Ok((username, password))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
}

impl StudentForm {
    pub fn validate(&self) -> Result<NewStudent, ConsoleError> {
        let name = self.name.trim();
        let student_id = self.student_id.trim();
        let email = self.email.trim();
        let password = self.password.trim();
        if name.is_empty() || student_id.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ConsoleError::validation(
                "Please fill all fields including password",
            ));
        }
        // Counted in UTF-16 code units, the way the service's web form counts.
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ConsoleError::validation(
                "Password must be at least 3 characters long",
            ));
        }
        Ok(NewStudent {
            name: name.to_string(),
            student_id: student_id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentEditForm {
    /// Database id of the student being edited.
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub email: String,
    /// Blank keeps the current password.
    pub password: String,
}

impl StudentEditForm {
    pub fn validate(&self) -> Result<StudentUpdate, ConsoleError> {
        let name = self.name.trim();
        let student_id = self.student_id.trim();
        let email = self.email.trim();
        if name.is_empty() || student_id.is_empty() || email.is_empty() {
            return Err(ConsoleError::validation("Please fill all required fields"));
        }
        let password = self.password.trim();
        Ok(StudentUpdate {
            name: name.to_string(),
            student_id: student_id.to_string(),
            email: email.to_string(),
            password: (!password.is_empty()).then(|| password.to_string()),
        })
    }
}

/// Grade form; scores stay text until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeForm {
    pub student_id: String,
    pub subject: String,
    pub score: String,
    pub max_score: String,
}

impl GradeForm {
    pub fn validate(&self) -> Result<NewGrade, ConsoleError> {
        let invalid = || ConsoleError::validation("Please fill all fields with valid values");
        let student_id = self.student_id.trim();
        let subject = self.subject.trim();
        if student_id.is_empty() || subject.is_empty() {
            return Err(invalid());
        }
        let score = parse_number(&self.score).ok_or_else(invalid)?;
        let max_score = parse_number(&self.max_score).ok_or_else(invalid)?;
        Ok(NewGrade {
            student_id: student_id.to_string(),
            subject: subject.to_string(),
            score,
            max_score,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
