//! Request handlers for the /risks endpoints

use tracing::info;

use super::multipart::{self, MultipartError};
use super::{ApiState, header_value, respond_error, respond_error_kind, respond_json};
use crate::register::{CsvImporter, RegisterError, RiskId, RiskRecord};

/// Multipart form field carrying the CSV upload
const UPLOAD_FIELD: &str = "file";

/// Parse a record id from a path segment like the `17` in `/risks/17`
pub(crate) fn parse_risk_id(segment: &str) -> Result<RiskId, RegisterError> {
    segment
        .parse::<RiskId>()
        .map_err(|_| RegisterError::InvalidInput("Invalid risk ID".to_string()))
}

fn parse_record(body: &[u8]) -> Result<RiskRecord, RegisterError> {
    serde_json::from_slice(body).map_err(|e| RegisterError::InvalidInput(e.to_string()))
}

pub fn handle_list(state: &ApiState, request: tiny_http::Request) {
    match state.store.list() {
        Ok(records) => respond_json(request, 200, &records),
        Err(e) => respond_error(request, &e),
    }
}

pub fn handle_get(state: &ApiState, segment: &str, request: tiny_http::Request) {
    let result = parse_risk_id(segment).and_then(|id| state.store.get(id));
    match result {
        Ok(record) => respond_json(request, 200, &record),
        Err(e) => respond_error(request, &e),
    }
}

pub fn handle_create(state: &ApiState, body: &[u8], request: tiny_http::Request) {
    let result = parse_record(body).and_then(|record| state.store.create(&record));
    match result {
        Ok(record) => respond_json(request, 201, &record),
        Err(e) => respond_error(request, &e),
    }
}

pub fn handle_update(state: &ApiState, segment: &str, body: &[u8], request: tiny_http::Request) {
    let result = parse_risk_id(segment).and_then(|id| {
        let record = parse_record(body)?;
        state.store.update(id, &record)
    });
    match result {
        Ok(record) => respond_json(request, 200, &record),
        Err(e) => respond_error(request, &e),
    }
}

pub fn handle_delete(state: &ApiState, segment: &str, request: tiny_http::Request) {
    let result = parse_risk_id(segment).and_then(|id| state.store.delete(id));
    match result {
        Ok(()) => {
            let _ = request.respond(tiny_http::Response::empty(200));
        }
        Err(e) => respond_error(request, &e),
    }
}

pub fn handle_import(state: &ApiState, body: &[u8], request: tiny_http::Request) {
    let content_type = header_value(&request, "Content-Type").unwrap_or_default();

    let csv = match upload_content(&content_type, body) {
        Ok(csv) => csv,
        Err(e) => {
            info!("[riskreg:http] Rejected upload: {}", e);
            respond_error_kind(request, 400, "invalid_input", "Error retrieving the file");
            return;
        }
    };

    match CsvImporter::new(&*state.store).import(csv.as_slice()) {
        Ok(records) => respond_json(request, 201, &records),
        Err(e) => respond_error(request, &e),
    }
}

/// CSV bytes from a multipart form or a raw `text/csv` body
fn upload_content(content_type: &str, body: &[u8]) -> Result<Vec<u8>, MultipartError> {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    if mime.eq_ignore_ascii_case("text/csv") || mime.eq_ignore_ascii_case("application/csv") {
        return Ok(body.to_vec());
    }

    let boundary = multipart::boundary(content_type).ok_or(MultipartError::MissingBoundary)?;
    multipart::extract_field(body, &boundary, UPLOAD_FIELD)
}
