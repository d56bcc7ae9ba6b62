//! Scripted transport for exercising the client without a backend.

use crate::config::DEFAULT_API_BASE_URL;
use crate::http::{ApiRequest, ApiResponse, Method, Transport};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

struct Route {
    method: Method,
    url: String,
    replies: VecDeque<Result<ApiResponse, String>>,
}

/// Replies to requests against [`DEFAULT_API_BASE_URL`] from a script.
///
/// Each route answers with its queued replies in order and keeps repeating the
/// last one. Unscripted requests fail at the transport level.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Ok(ApiResponse::new(status, body)));
        self
    }

    #[must_use]
    pub fn fail(self, method: Method, path: &str, reason: &str) -> Self {
        self.push(method, path, Err(reason.to_string()));
        self
    }

    fn push(&self, method: Method, path: &str, reply: Result<ApiResponse, String>) {
        let url = format!("{DEFAULT_API_BASE_URL}/{}", path.trim_start_matches('/'));
        let mut routes = self.routes.borrow_mut();
        if let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == method && r.url == url)
        {
            route.replies.push_back(reply);
        } else {
            routes.push(Route {
                method,
                url,
                replies: VecDeque::from([reply]),
            });
        }
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    /// `"METHOD path"` lines for the requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        let prefix = format!("{DEFAULT_API_BASE_URL}/");
        self.sent
            .borrow()
            .iter()
            .map(|r| {
                let path = r.url.strip_prefix(&prefix).unwrap_or(&r.url);
                format!("{} {path}", r.method)
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        let wanted = format!("{method} {path}");
        self.calls().iter().filter(|c| **c == wanted).count()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        self.sent.borrow_mut().push(request.clone());
        let mut routes = self.routes.borrow_mut();
        let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == request.method && r.url == request.url)
        else {
            return Err(format!("no route for {} {}", request.method, request.url));
        };
        if route.replies.len() > 1 {
            route.replies.pop_front().unwrap_or_else(|| Err("exhausted".into()))
        } else {
            route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| Err("exhausted".into()))
        }
    }
}
