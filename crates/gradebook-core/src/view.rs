//! Typed view models produced by console actions.
//!
//! These carry everything a front end needs to draw a result; no markup or
//! formatting decisions beyond labels live here.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::api::{ConnectionStatus, GradeReport, RankedStudent, Statistics, Student};
use crate::config::DEFAULT_NOTICE_TTL_SECS;
use crate::error::ConsoleError;
use crate::session::Role;
use crate::username::derive_username;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Form-level message that clears itself after a fixed delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text.into())
    }

    fn new(kind: NoticeKind, text: String) -> Self {
        Self {
            kind,
            text,
            shown_at: Instant::now(),
            ttl: Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

impl From<&ConsoleError> for Notice {
    fn from(e: &ConsoleError) -> Self {
        Notice::error(e.to_string())
    }
}

/// One listed student with the username the service derives for them.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub student: Student,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentListView {
    pub rows: Vec<StudentRow>,
}

impl StudentListView {
    pub fn from_students(students: Vec<Student>) -> Self {
        let rows = students
            .into_iter()
            .map(|student| StudentRow {
                username: derive_username(&student.name),
                student,
            })
            .collect();
        Self { rows }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some("No students found")
    }
}

/// Which lookup produced a grade report; decides titles and empty-state text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeScope {
    Mine,
    ByUsername(String),
    ById(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeLine {
    pub subject: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub recorded_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeReportView {
    pub scope: GradeScope,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub average: Option<f64>,
    pub total_score: f64,
    pub total_max_score: f64,
    /// In the order the service returned them.
    pub lines: Vec<GradeLine>,
}

impl GradeReportView {
    pub fn new(scope: GradeScope, report: GradeReport) -> Self {
        let lines = report
            .grades
            .iter()
            .map(|g| GradeLine {
                subject: g.subject.clone(),
                score: g.score,
                max_score: g.max_score,
                percentage: g.percentage(),
                recorded_on: g.recorded_on(),
            })
            .collect();
        Self {
            scope,
            name: report.student.name,
            student_id: report.student.student_id,
            email: report.student.email,
            average: report.average,
            total_score: report.total.total_score,
            total_max_score: report.total.total_max_score,
            lines,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.scope {
            GradeScope::Mine => "My Grades",
            _ => "Student Grades",
        }
    }

    pub fn lines_heading(&self) -> &'static str {
        match self.scope {
            GradeScope::Mine => "Your Grades:",
            _ => "Grades:",
        }
    }

    /// Username the report was looked up by, if any.
    pub fn username(&self) -> Option<&str> {
        match &self.scope {
            GradeScope::ByUsername(u) => Some(u),
            _ => None,
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.lines.is_empty() {
            return None;
        }
        Some(match self.scope {
            GradeScope::Mine => {
                "No grades found yet. Your grades will appear here once they are added."
            }
            _ => "No grades found for this student",
        })
    }
}

/// One leaderboard entry of the statistics view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatEntry {
    pub label: String,
    pub average: f64,
    pub student_name: String,
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    /// Subject filter the snapshot was scoped by.
    pub subject: Option<String>,
    pub total_students: u64,
    pub total_grades: u64,
    pub highest: Option<StatEntry>,
    pub lowest: Option<StatEntry>,
    pub pass_rate: Option<f64>,
}

impl StatisticsView {
    pub fn new(subject: Option<String>, stats: Statistics) -> Self {
        let subject = subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let entry = |kind: &str, ranked: RankedStudent| StatEntry {
            label: match &subject {
                Some(s) => format!("{kind} Grade ({s})"),
                None => format!("{kind} Average"),
            },
            average: ranked.average,
            student_name: ranked.student.name,
            student_id: ranked.student.student_id,
        };
        let highest = stats.highest_average.map(|r| entry("Highest", r));
        let lowest = stats.lowest_average.map(|r| entry("Lowest", r));
        Self {
            total_students: stats.total_students,
            total_grades: stats.total_grades,
            pass_rate: stats.pass_rate,
            highest,
            lowest,
            subject,
        }
    }

    pub fn total_students_label(&self) -> &'static str {
        if self.subject.is_some() {
            "Total Students (with grades in this subject)"
        } else {
            "Total Students"
        }
    }

    pub fn total_grades_label(&self) -> &'static str {
        if self.subject.is_some() {
            "Total Grades (in this subject)"
        } else {
            "Total Grades"
        }
    }

    pub fn pass_rate_label(&self) -> String {
        match &self.subject {
            Some(s) => format!("Pass Rate ({s})"),
            None => "Pass Rate".to_string(),
        }
    }

    /// Set whenever the snapshot has no leaderboard entries, regardless of the counts.
    pub fn empty_message(&self) -> Option<String> {
        if self.highest.is_some() || self.lowest.is_some() {
            return None;
        }
        Some(match &self.subject {
            Some(s) => format!("No grades found for subject \"{s}\""),
            None => "No statistics available".to_string(),
        })
    }
}

/// Everything a successful login produced. Each chained refresh has its own
/// outcome; a failed refresh does not undo the login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginView {
    pub username: String,
    pub role: Role,
    pub notice: Notice,
    pub connection: ConnectionStatus,
    /// Present only for the elevated role.
    pub students: Option<Result<StudentListView, ConsoleError>>,
    /// Present only for the restricted role.
    pub my_grades: Option<Result<GradeReportView, ConsoleError>>,
    pub statistics: Result<StatisticsView, ConsoleError>,
}

/// Result of a student create/update/delete: the notice plus the refreshed list.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentChangeView {
    pub notice: Notice,
    pub students: Result<StudentListView, ConsoleError>,
}

/// Output of [`crate::Console::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Connection(ConnectionStatus),
    Login(Box<LoginView>),
    LoggedOut,
    Students(StudentListView),
    StudentChanged(StudentChangeView),
    GradeAdded(Notice),
    Grades(GradeReportView),
    Statistics(StatisticsView),
    Username { name: String, username: String },
}
