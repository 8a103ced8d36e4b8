//! HTTP server for the risk register API
//!
//! Listens on the configured address and accepts:
//! - GET/POST /risks - list and create
//! - GET/PUT/DELETE /risks/{id} - single record access
//! - POST /risks/import - CSV bulk import (multipart field `file`, or a raw `text/csv` body)
//! - GET /ping - liveness check

mod handlers;
pub mod multipart;

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{Result, anyhow};
use serde::Serialize;
use tiny_http::{Response, Server};
use tracing::{debug, error, info};

use crate::config::ServerSettings;
use crate::register::{RegisterError, RiskStore};

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn RiskStore>,
    pub max_body_bytes: usize,
    pub max_upload_bytes: usize,
}

/// A running API server
///
/// Worker threads stop when the server is shut down or dropped.
pub struct RiskServer {
    server: Arc<Server>,
    addr: SocketAddr,
    workers: Vec<JoinHandle<()>>,
}

impl RiskServer {
    /// Bind the listener and start worker threads
    ///
    /// Returns once the socket is bound; a bind failure is returned as an error.
    pub fn start(settings: &ServerSettings, store: Arc<dyn RiskStore>) -> Result<Self> {
        let bind_addr = settings.bind_addr();
        let server = Server::http(&bind_addr)
            .map_err(|e| anyhow!("Failed to start server on {}: {}", bind_addr, e))?;
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| anyhow!("Server on {} is not bound to an IP address", bind_addr))?;
        let server = Arc::new(server);

        let state = ApiState {
            store,
            max_body_bytes: settings.max_body_bytes,
            max_upload_bytes: settings.max_upload_bytes,
        };

        let workers = (0..settings.workers.max(1))
            .map(|_| {
                let server = Arc::clone(&server);
                let state = state.clone();
                thread::spawn(move || {
                    for request in server.incoming_requests() {
                        handle_request(&state, request);
                    }
                })
            })
            .collect();

        info!("[riskreg:http] Server listening on http://{}", addr);
        Ok(Self {
            server,
            addr,
            workers,
        })
    }

    /// Address the listener is bound to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting requests and wait for in-flight ones to finish
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        // One unblock wakes one worker
        for _ in &self.workers {
            self.server.unblock();
        }
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("[riskreg:http] Worker thread panicked");
            }
        }
        info!("[riskreg:http] Server on {} stopped", self.addr);
    }
}

impl Drop for RiskServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_request(state: &ApiState, mut request: tiny_http::Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or(url.as_str());
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    debug!("[riskreg:http] {} {}", method, path);

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["ping"]) => {
            respond_json(
                request,
                200,
                &serde_json::json!({
                    "status": "ok",
                    "version": env!("CARGO_PKG_VERSION"),
                }),
            );
        }
        ("GET", ["risks"]) => handlers::handle_list(state, request),
        ("POST", ["risks"]) => {
            let body = match read_request_body(&mut request, state.max_body_bytes) {
                Ok(body) => body,
                Err(response) => {
                    let _ = request.respond(response);
                    return;
                }
            };
            handlers::handle_create(state, &body, request);
        }
        ("POST", ["risks", "import"]) => {
            let body = match read_request_body(&mut request, state.max_upload_bytes) {
                Ok(body) => body,
                Err(response) => {
                    let _ = request.respond(response);
                    return;
                }
            };
            handlers::handle_import(state, &body, request);
        }
        ("GET", ["risks", id]) => handlers::handle_get(state, id, request),
        ("PUT", ["risks", id]) => {
            let body = match read_request_body(&mut request, state.max_body_bytes) {
                Ok(body) => body,
                Err(response) => {
                    let _ = request.respond(response);
                    return;
                }
            };
            handlers::handle_update(state, id, &body, request);
        }
        ("DELETE", ["risks", id]) => handlers::handle_delete(state, id, request),
        (_, ["risks"]) | (_, ["risks", _]) => {
            respond_error_kind(request, 405, "method_not_allowed", "Method not allowed");
        }
        _ => {
            respond_error_kind(request, 404, "not_found", "Not found");
        }
    }
}

fn json_content_type() -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("static header is valid")
}

/// Value of a request header, matched case-insensitively
pub(crate) fn header_value(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

fn read_request_body(
    request: &mut tiny_http::Request,
    limit: usize,
) -> Result<Vec<u8>, Response<std::io::Cursor<Vec<u8>>>> {
    let mut body = Vec::new();
    let mut reader = request.as_reader().take((limit + 1) as u64);
    if let Err(e) = reader.read_to_end(&mut body) {
        error!("[riskreg:http] Failed to read body: {}", e);
        return Err(error_response(400, "invalid_input", "Failed to read request body"));
    }

    if body.len() > limit {
        return Err(error_response(
            413,
            "payload_too_large",
            &format!("Request body exceeds {} bytes", limit),
        ));
    }

    Ok(body)
}

fn error_response(
    status_code: u16,
    kind: &str,
    message: &str,
) -> Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": kind, "message": message }).to_string();
    Response::from_string(body)
        .with_status_code(status_code)
        .with_header(json_content_type())
}

pub(crate) fn respond_json<T: Serialize + ?Sized>(
    request: tiny_http::Request,
    status_code: u16,
    value: &T,
) {
    let body =
        serde_json::to_string(value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let response = Response::from_string(body)
        .with_status_code(status_code)
        .with_header(json_content_type());
    let _ = request.respond(response);
}

pub(crate) fn respond_error_kind(
    request: tiny_http::Request,
    status_code: u16,
    kind: &str,
    message: &str,
) {
    let _ = request.respond(error_response(status_code, kind, message));
}

/// Map a register error onto its status code and JSON body
pub(crate) fn respond_error(request: tiny_http::Request, err: &RegisterError) {
    let status_code = err.status_code();
    if status_code >= 500 {
        error!("[riskreg:http] {} {}: {}", request.method(), request.url(), err);
    }

    let mut body = serde_json::json!({
        "error": err.kind(),
        "message": err.to_string(),
    });
    if let Some(row) = err.row() {
        body["row"] = row.into();
    }
    if let Some(committed) = err.committed() {
        body["committed"] = committed.into();
    }
    respond_json(request, status_code, &body);
}
