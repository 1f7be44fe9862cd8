use tracing::{debug, warn};

use crate::server::api::{self, ApiError, ServerState};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub fn route_request(method: &str, path: &str, body: &str, state: &ServerState) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    debug!(method, path, "routing request");
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", "internal", &err.to_string()),
        },
        ("GET", "/api/rules") => match api::rules_payload() {
            Ok(payload) => HttpResponse::json(payload),
            Err(err) => error_response(500, "Internal Server Error", "internal", &err.to_string()),
        },
        ("POST", "/api/missions") => api_response(api::missions_payload(body, state)),
        ("POST", "/api/dispatch") => api_response(api::dispatch_payload(body, state)),
        _ => error_response(404, "Not Found", "not_found", "Route not found"),
    }
}

fn api_response(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(err) => {
            let (status_code, status_text) = match &err {
                ApiError::Parse(_) => (400, "Bad Request"),
                ApiError::Rejected(rejection) if rejection.is_validation() => (400, "Bad Request"),
                ApiError::Rejected(_) => (422, "Unprocessable Entity"),
                ApiError::Serialize(_) => (500, "Internal Server Error"),
            };
            if status_code == 500 {
                warn!(error = %err, "request failed");
            }
            error_response(status_code, status_text, err.code(), &err.to_string())
        }
    }
}

fn error_response(status_code: u16, status_text: &'static str, code: &str, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message,
    });
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&body)
            .unwrap_or_else(|_| "{\"status\": \"error\"}".to_string()),
    }
}
