//! In-memory transport for unit tests

use std::cell::RefCell;

use crate::core::context::{Overrides, RequestContext};
use crate::core::error::{Error, Result};
use crate::core::settings::{AssociatedEnv, Settings};
use crate::core::transport::{Method, Request, Response, Transport};

struct Route {
    method: Method,
    path: String,
    status: u16,
    body: String,
}

/// Answers requests from canned routes and records what was sent
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    requests: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` requests whose URL path (query excluded) ends with `path`
    pub fn on(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn sent(&self, method: Method, path: &str) -> bool {
        self.requests
            .borrow()
            .iter()
            .any(|r| r.method == method && url_path(&r.url).ends_with(path))
    }
}

fn url_path(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

impl Transport for MockTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let route = self
            .routes
            .iter()
            .find(|r| r.method == request.method && url_path(&request.url).ends_with(&r.path));
        self.requests.borrow_mut().push(request.clone());
        match route {
            Some(route) => Ok(Response {
                status: route.status,
                body: route.body.clone(),
            }),
            None => Err(Error::Transport(format!(
                "no mock route for {} {}",
                request.method, request.url
            ))),
        }
    }
}

/// A signed-in context associated with environment `env-1` / org `org-1`
pub fn associated_context() -> RequestContext {
    let mut settings = Settings {
        session_token: Some("session".to_string()),
        users_id: Some("user-1".to_string()),
        ..Settings::default()
    };
    settings.add_breadcrumb(
        "prod",
        AssociatedEnv {
            environment_id: "env-1".to_string(),
            name: "production".to_string(),
            pod: Some("pod01".to_string()),
            org_id: "org-1".to_string(),
        },
        true,
    );
    RequestContext::resolve(&settings, &Overrides::default())
}

/// A signed-in context with no association
pub fn unassociated_context() -> RequestContext {
    let settings = Settings {
        session_token: Some("session".to_string()),
        ..Settings::default()
    };
    RequestContext::resolve(&settings, &Overrides::default())
}
