//! Shared test utilities for register integration tests

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;

use riskreg::config::ServerSettings;
use riskreg::http_server::RiskServer;
use riskreg::register::{RegisterDb, RiskRepository};

pub const HEADER: &str =
    "name,code,desc,likelihood,impact,score,mitig,person,dept,date,status,stake,extra";

/// A file-backed database in a temporary directory
pub fn create_test_db() -> (TempDir, RegisterDb) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = RegisterDb::open(&temp_dir.path().join("risk_register.db"))
        .expect("Failed to open test db");
    (temp_dir, db)
}

/// Make every insert whose risk_id is `BOOM` fail inside SQLite
pub fn install_failing_insert_trigger(db: &RegisterDb) {
    db.conn()
        .expect("Failed to lock test db")
        .execute_batch(
            r#"
            CREATE TRIGGER fail_boom BEFORE INSERT ON risks
            WHEN NEW.risk_id = 'BOOM'
            BEGIN
                SELECT RAISE(ABORT, 'simulated storage failure');
            END;
            "#,
        )
        .expect("Failed to create trigger");
}

/// A CSV data row with the given name and risk code
pub fn csv_row(name: &str, code: &str) -> String {
    format!("{name},{code},Some risk,2,3,6,Mitigate,Dana,Ops,2026-12-01,Open,IT,")
}

/// Start a server on an ephemeral port backed by `db`
pub fn start_server(db: RegisterDb) -> (RiskServer, String) {
    let settings = ServerSettings {
        port: 0,
        workers: 2,
        ..Default::default()
    };
    let server = RiskServer::start(&settings, Arc::new(RiskRepository::new(db)))
        .expect("Failed to start test server");
    let base = format!("http://{}", server.addr());
    (server, base)
}

/// Status and body of a response, treating 4xx/5xx as regular responses
pub fn status_and_body(result: Result<ureq::Response, ureq::Error>) -> (u16, String) {
    match result {
        Ok(resp) => (resp.status(), resp.into_string().expect("Failed to read body")),
        Err(ureq::Error::Status(code, resp)) => {
            (code, resp.into_string().expect("Failed to read body"))
        }
        Err(e) => panic!("transport error: {e}"),
    }
}

/// Encode `content` as a multipart form with one part named `field`
pub fn multipart_body(boundary: &str, field: &str, content: &str) -> Vec<u8> {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"risks.csv\"\r\n\
         Content-Type: text/csv\r\n\
         \r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    )
    .into_bytes()
}
