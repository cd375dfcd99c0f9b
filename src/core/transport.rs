//! Blocking HTTP transport and response conversion
//!
//! API functions never talk to `reqwest` directly: they build a [`Request`]
//! and hand it to a [`Transport`], which keeps them testable without a
//! network.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::core::context::RequestContext;
use crate::core::error::{Error, Result};

const USER_AGENT: &str = concat!("paas-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Sends a request and returns the raw status and body
pub trait Transport {
    fn send(&self, request: Request) -> Result<Response>;
}

/// [`Transport`] backed by `reqwest::blocking`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Response { status, body })
    }
}

/// Standard headers for every API call
pub fn headers(ctx: &RequestContext) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        ("Accept", "application/json".to_string()),
        ("Content-Type", "application/json".to_string()),
        ("X-Api-Version", ctx.api_version.trim_start_matches('/').to_string()),
        ("X-Request-Nonce", format!("{:016x}", rand::rng().random::<u64>())),
        ("X-Request-Timestamp", chrono::Utc::now().timestamp().to_string()),
    ];
    if let Some(token) = &ctx.session_token {
        headers.push(("X-Session-Token", token.clone()));
    }
    if let Some(pod) = &ctx.pod {
        headers.push(("X-Pod-ID", pod.clone()));
    }
    if let Some(users_id) = &ctx.users_id {
        headers.push(("X-Users-ID", users_id.clone()));
    }
    headers
}

fn execute(
    transport: &dyn Transport,
    ctx: &RequestContext,
    method: Method,
    path: &str,
    body: Option<String>,
) -> Result<Response> {
    let request = Request {
        method,
        url: ctx.url(path),
        headers: headers(ctx),
        body,
    };
    debug!(method = %method, url = %request.url, "sending request");
    let response = transport.send(request)?;
    debug!(status = response.status, "received response");
    trace!(body = %response.body, "response body");
    Ok(response)
}

pub fn get<T: DeserializeOwned>(
    transport: &dyn Transport,
    ctx: &RequestContext,
    path: &str,
) -> Result<T> {
    let response = execute(transport, ctx, Method::Get, path, None)?;
    convert_response(response)
}

pub fn post<B: Serialize, T: DeserializeOwned>(
    transport: &dyn Transport,
    ctx: &RequestContext,
    path: &str,
    body: &B,
) -> Result<T> {
    let body = serde_json::to_string(body)?;
    let response = execute(transport, ctx, Method::Post, path, Some(body))?;
    convert_response(response)
}

pub fn delete(transport: &dyn Transport, ctx: &RequestContext, path: &str) -> Result<()> {
    let response = execute(transport, ctx, Method::Delete, path, None)?;
    check_status(&response)
}

/// Decode a successful body, or map the status onto the error taxonomy
pub fn convert_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    check_status(&response)?;
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    Ok(serde_json::from_str(body)?)
}

pub fn check_status(response: &Response) -> Result<()> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }

    let message = error_message(&response.body);
    Err(match response.status {
        400 | 422 => Error::Validation(message),
        401 => Error::Authentication(message),
        403 => Error::Authorization(message),
        404 => Error::NotFound(message),
        status => Error::Server { status, message },
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    title: Option<String>,
    description: Option<String>,
    message: Option<String>,
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorItem {
    message: String,
    code: Option<i64>,
}

/// Pull a human-readable message out of an API error body
fn error_message(body: &str) -> String {
    let parsed: ErrorBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            let trimmed = body.trim();
            return if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.to_string()
            };
        }
    };

    if !parsed.errors.is_empty() {
        return parsed
            .errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("({}) {}", code, e.message),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
    }

    match (parsed.title, parsed.description, parsed.message) {
        (Some(title), Some(description), _) => format!("{}: {}", title, description),
        (Some(title), None, _) => title,
        (None, Some(description), _) => description,
        (None, None, Some(message)) => message,
        (None, None, None) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Overrides;
    use crate::core::settings::Settings;
    use crate::core::testing::MockTransport;

    fn response(status: u16, body: &str) -> Response {
        Response {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(check_status(&response(204, "")), Ok(())));
        assert!(matches!(check_status(&response(400, "")), Err(Error::Validation(_))));
        assert!(matches!(check_status(&response(401, "")), Err(Error::Authentication(_))));
        assert!(matches!(check_status(&response(403, "")), Err(Error::Authorization(_))));
        assert!(matches!(check_status(&response(404, "")), Err(Error::NotFound(_))));
        assert!(matches!(
            check_status(&response(502, "")),
            Err(Error::Server { status: 502, .. })
        ));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"title": "Not Found", "description": "no such invite"}"#),
            "Not Found: no such invite"
        );
        assert_eq!(
            error_message(r#"{"errors": [{"message": "bad email", "code": 1}, {"message": "x"}]}"#),
            "(1) bad email; x"
        );
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "no response body");
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let result: Result<()> = convert_response(response(200, ""));
        assert!(result.is_ok());
    }

    #[test]
    fn test_malformed_body_is_transport_error() {
        let err = convert_response::<Vec<String>>(response(200, "{")).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_headers_carry_session() {
        let settings = Settings {
            session_token: Some("tok".to_string()),
            users_id: Some("user-1".to_string()),
            pod: Some("pod01".to_string()),
            ..Settings::default()
        };
        let ctx = RequestContext::resolve(&settings, &Overrides::default());
        let headers = headers(&ctx);
        let find = |name: &str| {
            headers
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(find("X-Session-Token"), Some("tok"));
        assert_eq!(find("X-Users-ID"), Some("user-1"));
        assert_eq!(find("X-Pod-ID"), Some("pod01"));
        assert_eq!(find("X-Api-Version"), Some("v1"));
        assert!(find("X-Request-Nonce").is_some());
    }

    #[test]
    fn test_get_builds_url() {
        let transport = MockTransport::new().on(Method::Get, "/orgs/roles", 200, "[]");
        let ctx = RequestContext::resolve(&Settings::default(), &Overrides::default());
        let roles: Vec<serde_json::Value> = get(&transport, &ctx, "/orgs/roles").unwrap();
        assert!(roles.is_empty());
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, ctx.url("/orgs/roles"));
    }
}
