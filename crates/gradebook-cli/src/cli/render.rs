//! Plain-text rendering of console views.
//!
//! Everything returns a `String` so the one-shot commands and the shell can
//! write to whatever sink they hold.

use std::fmt::Write as _;

use gradebook_core::api::ConnectionStatus;
use gradebook_core::view::{
    GradeReportView, LoginView, Notice, NoticeKind, StatEntry, StatisticsView, StudentListView,
    View,
};
use gradebook_core::ConsoleError;

pub fn render_view(view: &View) -> String {
    match view {
        View::Connection(status) => render_connection(*status),
        View::Login(login) => render_login(login),
        View::LoggedOut => "Logged out.\n".to_string(),
        View::Students(list) => render_students(list),
        View::StudentChanged(change) => {
            let mut out = render_notice(&change.notice);
            out.push_str(&render_section(&change.students, render_students));
            out
        }
        View::GradeAdded(notice) => render_notice(notice),
        View::Grades(report) => render_grades(report),
        View::Statistics(stats) => render_statistics(stats),
        View::Username { name, username } => format!("{name} -> {username}\n"),
    }
}

pub fn render_connection(status: ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Connected => "Connected\n".to_string(),
        ConnectionStatus::Disconnected => "Disconnected\n".to_string(),
    }
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("{}\n", notice.text),
        NoticeKind::Error => format!("error: {}\n", notice.text),
    }
}

pub fn render_error(err: &ConsoleError) -> String {
    render_notice(&Notice::from(err))
}

/// A chained refresh either renders or shows its own error in place.
fn render_section<V>(outcome: &Result<V, ConsoleError>, render: fn(&V) -> String) -> String {
    match outcome {
        Ok(v) => render(v),
        Err(e) => render_error(e),
    }
}

pub fn render_login(view: &LoginView) -> String {
    let mut out = render_notice(&view.notice);
    let _ = writeln!(out, "Welcome, {} ({})", view.username, view.role);
    out.push_str(&render_connection(view.connection));
    if let Some(students) = &view.students {
        out.push('\n');
        out.push_str(&render_section(students, render_students));
    }
    if let Some(grades) = &view.my_grades {
        out.push('\n');
        out.push_str(&render_section(grades, render_grades));
    }
    out.push('\n');
    out.push_str(&render_section(&view.statistics, render_statistics));
    out
}

pub fn render_students(list: &StudentListView) -> String {
    if let Some(empty) = list.empty_message() {
        return format!("{empty}\n");
    }
    let mut out = format!(
        "{:<6} {:<24} {:<12} {:<20} {}\n",
        "ID", "NAME", "STUDENT ID", "USERNAME", "EMAIL"
    );
    for row in &list.rows {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<12} {:<20} {}",
            row.student.id, row.student.name, row.student.student_id, row.username, row.student.email
        );
    }
    out
}

pub fn render_grades(report: &GradeReportView) -> String {
    let mut out = format!("{}\n", report.title());
    let _ = writeln!(out, "Name: {}", report.name);
    let _ = writeln!(out, "Student ID: {}", report.student_id);
    if let Some(username) = report.username() {
        let _ = writeln!(out, "Username: {username}");
    }
    let _ = writeln!(out, "Email: {}", report.email);
    if let Some(avg) = report.average {
        let _ = writeln!(out, "Average: {avg:.2}%");
    }
    let _ = writeln!(
        out,
        "Total: {}/{}",
        report.total_score, report.total_max_score
    );
    out.push('\n');
    if let Some(empty) = report.empty_message() {
        let _ = writeln!(out, "{empty}");
        return out;
    }
    let _ = writeln!(out, "{}", report.lines_heading());
    let _ = writeln!(
        out,
        "{:<20} {:<12} {:<10} {}",
        "SUBJECT", "SCORE", "PERCENT", "RECORDED"
    );
    for line in &report.lines {
        let recorded = line
            .recorded_on
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<10} {}",
            line.subject,
            format!("{}/{}", line.score, line.max_score),
            format!("{:.1}%", line.percentage),
            recorded
        );
    }
    out
}

fn render_entry(out: &mut String, entry: &StatEntry) {
    let _ = writeln!(
        out,
        "{}: {:.2}% ({}, {})",
        entry.label, entry.average, entry.student_name, entry.student_id
    );
}

pub fn render_statistics(stats: &StatisticsView) -> String {
    let mut out = match &stats.subject {
        Some(subject) => format!("Statistics for {subject}\n"),
        None => "Statistics\n".to_string(),
    };
    let _ = writeln!(out, "{}: {}", stats.total_students_label(), stats.total_students);
    let _ = writeln!(out, "{}: {}", stats.total_grades_label(), stats.total_grades);
    if let Some(entry) = &stats.highest {
        render_entry(&mut out, entry);
    }
    if let Some(entry) = &stats.lowest {
        render_entry(&mut out, entry);
    }
    if let Some(rate) = stats.pass_rate {
        let _ = writeln!(out, "{}: {:.1}%", stats.pass_rate_label(), rate);
    }
    if let Some(empty) = stats.empty_message() {
        let _ = writeln!(out, "{empty}");
    }
    out
}
