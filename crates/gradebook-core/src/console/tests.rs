use std::cell::RefCell;

use super::*;
use crate::api::ConnectionStatus;
use crate::http::{HttpRequest, HttpResponse, Method, TransportError, TransportErrorKind};
use crate::session::Role;

const BASE: &str = "http://svc.test";

enum Reply {
    Json(u32, &'static str),
    Fail,
}

/// In-memory transport: answers from a route table and records every request.
#[derive(Default)]
struct Scripted {
    routes: Vec<(Method, &'static str, Reply)>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    fn on(mut self, method: Method, path: &'static str, reply: Reply) -> Self {
        self.routes.push((method, path, reply));
        self
    }

    fn calls(&self) -> Vec<(Method, String)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.method, r.url.trim_start_matches(BASE).to_string()))
            .collect()
    }

    fn last(&self) -> HttpRequest {
        self.requests.borrow().last().cloned().expect("a request")
    }
}

impl Transport for Scripted {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        let path = request.url.trim_start_matches(BASE);
        let reply = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == request.method && *p == path)
            .map(|(_, _, r)| r);
        match reply {
            Some(Reply::Json(status, body)) => Ok(HttpResponse {
                status: *status,
                reason: crate::http::canonical_reason(*status)
                    .unwrap_or_default()
                    .to_string(),
                content_type: Some("application/json".into()),
                body: body.as_bytes().to_vec(),
            }),
            Some(Reply::Fail) => Err(TransportError {
                kind: TransportErrorKind::Connection,
                message: "Couldn't connect to server".into(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                reason: "Not Found".into(),
                content_type: None,
                body: Vec::new(),
            }),
        }
    }
}

fn console(t: Scripted) -> Console<Scripted> {
    let cfg = ConsoleConfig {
        api_url: BASE.into(),
        ..ConsoleConfig::default()
    };
    Console::new(cfg, t)
}

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        api_url: BASE.into(),
        username: username.into(),
        password: password.into(),
    }
}

const STATS_EMPTY: &str = r#"{"totalStudents": 3, "totalGrades": 0}"#;
const STUDENTS: &str =
    r#"[{"id": 1, "name": "Mary-Jane O'Brien, Jr.", "studentId": "S1", "email": "mj@example.edu"}]"#;
const REPORT: &str = r#"{
    "student": {"id": 1, "name": "Ann Lee", "studentId": "S1", "email": "ann@example.edu"},
    "average": 88.0,
    "total": {"totalScore": 176, "totalMaxScore": 200},
    "grades": [
        {"subject": "Math", "score": 96, "maxScore": 100, "percentage": 96.0, "dateRecorded": "2024-05-02T08:00:00"},
        {"subject": "Art", "score": 80, "maxScore": 100, "percentage": 80.0, "dateRecorded": "2024-05-01T08:00:00"}
    ]
}"#;

fn admin_console(t: Scripted) -> Console<Scripted> {
    let t = t.on(Method::Post, "/api/auth/login", Reply::Json(200, r#"{"role":"Admin"}"#));
    let mut c = console(t);
    c.login(&login_form("Admin", "admin123")).unwrap();
    c.transport().requests.borrow_mut().clear();
    c
}

#[test]
fn login_with_empty_password_sends_nothing() {
    let mut c = console(Scripted::default());
    let err = c.login(&login_form("admin", "  ")).unwrap_err();
    assert_eq!(err, ConsoleError::validation("Please enter username and password"));
    assert!(c.transport().calls().is_empty());
    assert!(c.session().is_none());
}

#[test]
fn admin_login_chain_probes_lists_and_loads_statistics() {
    let t = Scripted::default()
        .on(Method::Post, "/api/auth/login", Reply::Json(200, r#"{"role":"Admin"}"#))
        .on(Method::Get, "/api/students", Reply::Json(200, STUDENTS))
        .on(Method::Get, "/api/statistics", Reply::Json(200, STATS_EMPTY));
    let mut c = console(t);
    let view = c.login(&login_form("  AdminUser ", "secret")).unwrap();

    assert_eq!(
        c.transport().calls(),
        vec![
            (Method::Post, "/api/auth/login".to_string()),
            (Method::Get, "/api/students".to_string()),
            (Method::Get, "/api/students".to_string()),
            (Method::Get, "/api/statistics".to_string()),
        ]
    );
    let login_body = c.transport().requests.borrow()[0].body_json().unwrap();
    assert_eq!(login_body["username"], "AdminUser");
    assert_eq!(login_body["password"], "secret");

    assert_eq!(view.role, Role::Admin);
    assert_eq!(view.connection, ConnectionStatus::Connected);
    let students = view.students.unwrap().unwrap();
    assert_eq!(students.rows[0].username, "maryjaneobrienjr");
    assert!(view.my_grades.is_none());
    assert_eq!(
        view.statistics.unwrap().empty_message().as_deref(),
        Some("No statistics available")
    );

    let session = c.session().unwrap();
    assert_eq!(session.username(), "adminuser");
}

#[test]
fn student_login_loads_own_grades_without_asking() {
    let t = Scripted::default()
        .on(Method::Post, "/api/auth/login", Reply::Json(200, r#"{"role":"Student"}"#))
        .on(Method::Get, "/api/students", Reply::Json(401, ""))
        .on(Method::Get, "/api/students/my-grades", Reply::Json(200, REPORT))
        .on(Method::Get, "/api/statistics", Reply::Json(200, STATS_EMPTY));
    let mut c = console(t);
    let view = c.login(&login_form("AnnLee", "pw1")).unwrap();

    assert_eq!(view.connection, ConnectionStatus::Connected);
    assert!(view.students.is_none());
    let grades = view.my_grades.unwrap().unwrap();
    assert_eq!(grades.title(), "My Grades");
    let subjects: Vec<_> = grades.lines.iter().map(|l| l.subject.as_str()).collect();
    assert_eq!(subjects, ["Math", "Art"]);

    let my_grades_req = c
        .transport()
        .requests
        .borrow()
        .iter()
        .find(|r| r.url.ends_with("/my-grades"))
        .cloned()
        .unwrap();
    assert_eq!(my_grades_req.header("X-Username"), Some("annlee"));
    assert_eq!(my_grades_req.header("Content-Type"), Some("application/json"));
}

#[test]
fn rejected_login_surfaces_server_message() {
    let t = Scripted::default().on(
        Method::Post,
        "/api/auth/login",
        Reply::Json(401, r#"{"message":"Invalid username or password"}"#),
    );
    let mut c = console(t);
    let err = c.login(&login_form("admin", "wrong")).unwrap_err();
    assert_eq!(
        err,
        ConsoleError::Remote {
            status: 401,
            message: "Invalid username or password".into()
        }
    );
    assert!(c.session().is_none());
}

#[test]
fn login_transport_failure_rechecks_connectivity() {
    let t = Scripted::default()
        .on(Method::Post, "/api/auth/login", Reply::Fail)
        .on(Method::Get, "/api/students", Reply::Fail);
    let mut c = console(t);
    let err = c.login(&login_form("admin", "pw")).unwrap_err();
    assert_eq!(err.to_string(), "Connection error: Couldn't connect to server");
    assert_eq!(c.connection(), Some(ConnectionStatus::Disconnected));
    assert_eq!(c.transport().calls().len(), 2);
}

#[test]
fn probe_status_mapping() {
    for (reply, expected) in [
        (Reply::Json(200, "[]"), ConnectionStatus::Connected),
        (Reply::Json(401, ""), ConnectionStatus::Connected),
        (Reply::Json(500, ""), ConnectionStatus::Disconnected),
        (Reply::Fail, ConnectionStatus::Disconnected),
    ] {
        let mut c = console(Scripted::default().on(Method::Get, "/api/students", reply));
        assert_eq!(c.dispatch(Command::Probe).unwrap(), View::Connection(expected));
    }
}

#[test]
fn short_password_blocks_student_creation_locally() {
    let t = Scripted::default()
        .on(Method::Post, "/api/students", Reply::Json(201, "{}"))
        .on(Method::Get, "/api/students", Reply::Json(200, STUDENTS));
    let mut c = admin_console(t);
    let mut form = StudentForm {
        name: "Mary-Jane O'Brien, Jr.".into(),
        student_id: "S1".into(),
        email: "mj@example.edu".into(),
        password: "pw".into(),
    };
    let err = c.dispatch(Command::AddStudent(form.clone())).unwrap_err();
    assert!(err.is_local());
    assert!(c.transport().calls().is_empty());

    form.password = "pw3".into();
    let view = c.dispatch(Command::AddStudent(form)).unwrap();
    let View::StudentChanged(change) = view else {
        panic!("expected StudentChanged");
    };
    assert_eq!(
        change.notice.text,
        "Student added successfully! Username: maryjaneobrienjr"
    );
    assert_eq!(
        c.transport().calls(),
        vec![
            (Method::Post, "/api/students".to_string()),
            (Method::Get, "/api/students".to_string()),
        ]
    );
    let create = c.transport().requests.borrow()[0].clone();
    assert_eq!(create.header("X-Username"), Some("admin"));
    assert_eq!(create.body_json().unwrap()["studentId"], "S1");
}

#[test]
fn update_with_blank_password_sends_null() {
    let t = Scripted::default()
        .on(Method::Put, "/api/students/7", Reply::Json(204, ""))
        .on(Method::Get, "/api/students", Reply::Json(200, "[]"));
    let mut c = admin_console(t);
    let view = c
        .dispatch(Command::UpdateStudent(StudentEditForm {
            id: 7,
            name: "Ann Lee".into(),
            student_id: "S7".into(),
            email: "ann@example.edu".into(),
            password: String::new(),
        }))
        .unwrap();
    let put = c.transport().requests.borrow()[0].clone();
    let body = put.body_json().unwrap();
    assert!(body["password"].is_null());
    assert_ne!(body["password"], "");
    let View::StudentChanged(change) = view else {
        panic!("expected StudentChanged");
    };
    assert_eq!(change.notice.text, "Student updated successfully!");
    assert!(change.students.unwrap().rows.is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let t = Scripted::default()
        .on(Method::Delete, "/api/students/3", Reply::Json(204, ""))
        .on(Method::Get, "/api/students", Reply::Json(200, "[]"));
    let mut c = admin_console(t);
    let err = c
        .dispatch(Command::DeleteStudent {
            id: 3,
            confirmed: false,
        })
        .unwrap_err();
    assert_eq!(err, ConsoleError::validation("Deletion not confirmed"));
    assert!(c.transport().calls().is_empty());

    c.dispatch(Command::DeleteStudent {
        id: 3,
        confirmed: true,
    })
    .unwrap();
    assert_eq!(c.transport().calls()[0], (Method::Delete, "/api/students/3".to_string()));
}

#[test]
fn management_needs_admin_session() {
    let mut c = console(Scripted::default());
    let form = GradeForm {
        student_id: "S1".into(),
        subject: "Math".into(),
        score: "9".into(),
        max_score: "10".into(),
    };
    assert_eq!(
        c.dispatch(Command::AddGrade(form.clone())).unwrap_err(),
        ConsoleError::NotLoggedIn
    );

    let t = Scripted::default().on(
        Method::Post,
        "/api/auth/login",
        Reply::Json(200, r#"{"role":"Student"}"#),
    );
    let mut c = console(t);
    c.login(&login_form("ann", "pw1")).unwrap();
    c.transport().requests.borrow_mut().clear();
    assert!(matches!(
        c.dispatch(Command::AddGrade(form)).unwrap_err(),
        ConsoleError::Forbidden(_)
    ));
    assert!(matches!(
        c.dispatch(Command::ListStudents).unwrap_err(),
        ConsoleError::Forbidden(_)
    ));
    assert!(c.transport().calls().is_empty());
}

#[test]
fn non_numeric_score_is_rejected_before_sending() {
    let t = Scripted::default().on(Method::Post, "/api/grades", Reply::Json(201, "{}"));
    let mut c = admin_console(t);
    let mut form = GradeForm {
        student_id: "S1".into(),
        subject: "Math".into(),
        score: "abc".into(),
        max_score: "100".into(),
    };
    assert!(c.dispatch(Command::AddGrade(form.clone())).is_err());
    assert!(c.transport().calls().is_empty());

    form.score = "95".into();
    let view = c.dispatch(Command::AddGrade(form)).unwrap();
    assert!(matches!(view, View::GradeAdded(ref n) if n.text == "Grade added successfully!"));
    let body = c.transport().last().body_json().unwrap();
    assert_eq!(body["score"], 95.0);
    assert_eq!(body["maxScore"], 100.0);
}

#[test]
fn grades_by_username_encodes_segment_and_keeps_order() {
    let t = Scripted::default().on(
        Method::Get,
        "/api/students/by-username/ann%20lee/grades",
        Reply::Json(200, REPORT),
    );
    let mut c = admin_console(t);
    let view = c
        .dispatch(Command::GradesByUsername(" ann lee ".into()))
        .unwrap();
    let View::Grades(report) = view else {
        panic!("expected Grades");
    };
    assert_eq!(report.username(), Some("ann lee"));
    assert_eq!(report.lines[0].subject, "Math");
    assert_eq!(c.transport().last().header("X-Username"), Some("admin"));
}

#[test]
fn grades_by_id_is_unauthenticated_and_uses_lookup_fallback() {
    let mut c = admin_console(Scripted::default());
    let err = c.dispatch(Command::GradesById(42)).unwrap_err();
    assert_eq!(
        err,
        ConsoleError::Remote {
            status: 404,
            message: "Not Found".into()
        }
    );
    let req = c.transport().last();
    assert!(req.url.ends_with("/api/students/42/grades"));
    assert_eq!(req.header("X-Username"), None);
}

#[test]
fn statistics_subject_filter_and_plain_text_error() {
    let t = Scripted::default().on(
        Method::Get,
        "/api/statistics?subject=Chemistry",
        Reply::Json(400, "Unknown subject"),
    );
    let mut c = console(t);
    let err = c
        .dispatch(Command::Statistics {
            subject: Some("Chemistry".into()),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown subject");
}

#[test]
fn logout_drops_session() {
    let mut c = admin_console(Scripted::default());
    assert!(c.session().is_some());
    assert_eq!(c.dispatch(Command::Logout).unwrap(), View::LoggedOut);
    assert!(c.session().is_none());
    assert_eq!(
        c.dispatch(Command::MyGrades).unwrap_err(),
        ConsoleError::NotLoggedIn
    );
}

#[test]
fn derive_username_needs_no_network() {
    let mut c = console(Scripted::default());
    let view = c
        .dispatch(Command::DeriveUsername("Mary-Jane O'Brien, Jr.".into()))
        .unwrap();
    assert_eq!(
        view,
        View::Username {
            name: "Mary-Jane O'Brien, Jr.".into(),
            username: "maryjaneobrienjr".into()
        }
    );
    assert!(c.transport().calls().is_empty());
}

#[test]
fn authenticate_sends_only_the_login_request() {
    let t = Scripted::default()
        .on(Method::Post, "/api/auth/login", Reply::Json(200, r#"{"role":"Admin"}"#))
        .on(Method::Post, "/api/grades", Reply::Json(201, "{}"));
    let mut c = console(t);
    let session = c.authenticate(&login_form("Admin", "admin123")).unwrap();
    assert_eq!(session.role(), &Role::Admin);
    assert_eq!(c.session().map(Session::username), Some("admin"));
    assert_eq!(
        c.transport().calls(),
        vec![(Method::Post, "/api/auth/login".to_string())]
    );

    c.dispatch(Command::AddGrade(GradeForm {
        student_id: "S1".into(),
        subject: "Math".into(),
        score: "90".into(),
        max_score: "100".into(),
    }))
    .unwrap();
    assert_eq!(
        c.transport().calls(),
        vec![
            (Method::Post, "/api/auth/login".to_string()),
            (Method::Post, "/api/grades".to_string()),
        ]
    );
}

#[test]
fn own_grades_with_non_json_success_body_is_a_decode_error() {
    let t = Scripted::default()
        .on(Method::Post, "/api/auth/login", Reply::Json(200, r#"{"role":"Student"}"#))
        .on(Method::Get, "/api/students/my-grades", Reply::Json(200, "<html>maintenance</html>"));
    let mut c = console(t);
    c.authenticate(&login_form("AnnLee", "pw1")).unwrap();

    let err = c.dispatch(Command::MyGrades).unwrap_err();
    assert_eq!(err, ConsoleError::Decode("<html>maintenance</html>".into()));
    assert_eq!(
        err.to_string(),
        "Error parsing response: <html>maintenance</html>"
    );
}

#[test]
fn login_with_non_json_success_body_is_a_decode_error() {
    let t = Scripted::default().on(Method::Post, "/api/auth/login", Reply::Json(200, "OK"));
    let mut c = console(t);
    let err = c.login(&login_form("admin", "admin123")).unwrap_err();
    assert_eq!(err, ConsoleError::Decode("OK".into()));
    assert_eq!(err.to_string(), "Error parsing response: OK");
    assert!(c.session().is_none());
    assert_eq!(c.transport().calls().len(), 1);
}

#[test]
fn blank_username_lookup_is_rejected_before_session_check() {
    let mut c = console(Scripted::default());
    assert_eq!(
        c.dispatch(Command::GradesByUsername("   ".into())).unwrap_err(),
        ConsoleError::validation("Please enter a username")
    );
    assert_eq!(
        c.dispatch(Command::GradesByUsername("annlee".into())).unwrap_err(),
        ConsoleError::NotLoggedIn
    );
    assert!(c.transport().calls().is_empty());
}

#[test]
fn student_list_failure_uses_extraction_policy() {
    let t = Scripted::default().on(Method::Get, "/api/students", Reply::Json(500, ""));
    let mut c = console(t);
    assert_eq!(
        c.dispatch(Command::ListStudents).unwrap_err(),
        ConsoleError::Remote {
            status: 500,
            message: "Internal Server Error".into()
        }
    );
}
