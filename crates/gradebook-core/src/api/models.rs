//! JSON shapes exchanged with the service (camelCase on the wire).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub role: String,
}

/// Student as returned by the service. The password is never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/students/{id}`. `password: None` is sent as `null`
/// and means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrade {
    pub student_id: String,
    pub subject: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(default)]
    pub student_id: Option<String>,
    pub subject: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub date_recorded: Option<String>,
}

impl Grade {
    /// Percentage as sent by the service, or `score / maxScore * 100` when absent.
    pub fn percentage(&self) -> f64 {
        match self.percentage {
            Some(p) => p,
            None if self.max_score != 0.0 => self.score / self.max_score * 100.0,
            None => 0.0,
        }
    }

    /// Calendar date of `dateRecorded`. Accepts RFC 3339 and the offset-less
    /// ISO form the service emits for local timestamps.
    pub fn recorded_on(&self) -> Option<NaiveDate> {
        let raw = self.date_recorded.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeTotal {
    pub total_score: f64,
    pub total_max_score: f64,
}

/// Response of the three grade lookups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeReport {
    pub student: Student,
    #[serde(default)]
    pub average: Option<f64>,
    pub total: GradeTotal,
    #[serde(default)]
    pub grades: Vec<Grade>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankedStudent {
    pub average: f64,
    pub student: Student,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub total_grades: u64,
    #[serde(default)]
    pub highest_average: Option<RankedStudent>,
    #[serde(default)]
    pub lowest_average: Option<RankedStudent>,
    #[serde(default)]
    pub pass_rate: Option<f64>,
}
