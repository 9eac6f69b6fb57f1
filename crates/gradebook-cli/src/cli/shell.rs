//! Interactive shell: one console, one session, many commands.
//!
//! Reads commands line by line; multi-field forms prompt for each field on
//! the same input. The last notice stays visible in `status` until its TTL
//! runs out.

use std::io::{BufRead, Write};

use anyhow::Result;
use gradebook_core::console::{GradeForm, LoginForm, StudentEditForm, StudentForm};
use gradebook_core::http::Transport;
use gradebook_core::view::{Notice, View};
use gradebook_core::{Command, Console};

use super::render::{render_connection, render_error, render_notice, render_view};

const HELP: &str = "\
Commands:
  login [USERNAME] [PASSWORD]   log in (prompts for missing fields)
  logout                        drop the session
  probe                         check the service is reachable
  url [URL]                     show or change the service URL
  status                        session, connection and last notice
  students                      list students
  add-student                   create a student (prompts)
  edit-student ID               update a student (prompts; blank password keeps it)
  delete-student ID             delete a student (asks for confirmation)
  add-grade                     record a grade (prompts)
  my-grades                     your own grades (Student accounts)
  grades USERNAME               grades of a student by username
  grades-id ID                  grades of a student by database id
  stats [SUBJECT]               statistics, optionally for one subject
  username NAME                 username derived from a display name
  help                          this text
  quit                          leave the shell
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<T: Transport> {
    console: Console<T>,
    notice: Option<Notice>,
}

impl<T: Transport> Shell<T> {
    pub fn new(console: Console<T>) -> Self {
        Self {
            console,
            notice: None,
        }
    }

    #[cfg(test)]
    pub fn console(&self) -> &Console<T> {
        &self.console
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Type `help` for commands.")?;
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break;
            };
            if self.execute(&line, &mut input, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.console.session() {
            Some(s) => format!("gradebook[{}]> ", s.display_name()),
            None => "gradebook> ".to_string(),
        }
    }

    /// Notice still inside its display window.
    pub fn active_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    pub fn status_line(&self) -> String {
        let who = match self.console.session() {
            Some(s) => format!("Logged in as {} ({})", s.display_name(), s.role()),
            None => "Not logged in".to_string(),
        };
        let connection = match self.console.connection() {
            Some(status) => render_connection(status).trim_end().to_string(),
            None => "not checked".to_string(),
        };
        format!("{who} | {} | {connection}", self.console.api_url())
    }

    /// Runs one command line. `input` supplies answers to prompts.
    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let command = match word {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" | "?" => {
                write!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            "status" => {
                writeln!(out, "{}", self.status_line())?;
                if let Some(notice) = self.active_notice() {
                    write!(out, "{}", render_notice(notice))?;
                }
                return Ok(Flow::Continue);
            }
            "url" => {
                if !rest.is_empty() {
                    self.console.set_api_url(rest);
                }
                writeln!(out, "{}", self.console.api_url())?;
                return Ok(Flow::Continue);
            }
            "probe" => Command::Probe,
            "login" => {
                let mut parts = rest.split_whitespace();
                let username = match parts.next() {
                    Some(u) => u.to_string(),
                    None => prompt(input, out, "Username")?,
                };
                let password = match parts.next() {
                    Some(p) => p.to_string(),
                    None => prompt(input, out, "Password")?,
                };
                Command::Login(LoginForm {
                    api_url: self.console.api_url().to_string(),
                    username,
                    password,
                })
            }
            "logout" => Command::Logout,
            "students" => Command::ListStudents,
            "add-student" => Command::AddStudent(StudentForm {
                name: prompt(input, out, "Name")?,
                student_id: prompt(input, out, "Student ID")?,
                email: prompt(input, out, "Email")?,
                password: prompt(input, out, "Password")?,
            }),
            "edit-student" => {
                let Some(id) = parse_id(rest) else {
                    writeln!(out, "usage: edit-student ID")?;
                    return Ok(Flow::Continue);
                };
                Command::UpdateStudent(StudentEditForm {
                    id,
                    name: prompt(input, out, "Name")?,
                    student_id: prompt(input, out, "Student ID")?,
                    email: prompt(input, out, "Email")?,
                    password: prompt(input, out, "New password (blank keeps current)")?,
                })
            }
            "delete-student" => {
                let Some(id) = parse_id(rest) else {
                    writeln!(out, "usage: delete-student ID")?;
                    return Ok(Flow::Continue);
                };
                let answer = prompt(input, out, &format!("Delete student {id}? [y/N]"))?;
                let confirmed = matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes");
                Command::DeleteStudent { id, confirmed }
            }
            "add-grade" => Command::AddGrade(GradeForm {
                student_id: prompt(input, out, "Student ID")?,
                subject: prompt(input, out, "Subject")?,
                score: prompt(input, out, "Score")?,
                max_score: prompt(input, out, "Max score")?,
            }),
            "my-grades" => Command::MyGrades,
            "grades" => Command::GradesByUsername(rest.to_string()),
            "grades-id" => {
                let Some(id) = parse_id(rest) else {
                    writeln!(out, "usage: grades-id ID")?;
                    return Ok(Flow::Continue);
                };
                Command::GradesById(id)
            }
            "stats" => Command::Statistics {
                subject: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "username" => Command::DeriveUsername(rest.to_string()),
            other => {
                writeln!(out, "unknown command: {other} (try `help`)")?;
                return Ok(Flow::Continue);
            }
        };

        match self.console.dispatch(command) {
            Ok(view) => {
                write!(out, "{}", render_view(&view))?;
                if let Some(notice) = notice_of(&view) {
                    self.notice = Some(notice.clone());
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "shell command failed");
                write!(out, "{}", render_error(&e))?;
                let ttl = self.console.config().notice_ttl();
                self.notice = Some(Notice::from(&e).with_ttl(ttl));
            }
        }
        Ok(Flow::Continue)
    }
}

fn notice_of(view: &View) -> Option<&Notice> {
    match view {
        View::Login(login) => Some(&login.notice),
        View::StudentChanged(change) => Some(&change.notice),
        View::GradeAdded(notice) => Some(notice),
        _ => None,
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// One line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Asks for one field. End of input answers with an empty string.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}
