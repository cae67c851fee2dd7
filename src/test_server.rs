// src/test_server.rs
// =============================================================================
// A minimal HTTP/1.1 server for tests.
//
// Serves a fixed set of paths, answers everything else with 404, and records
// every request (path and User-Agent) so tests can count downloads.
// =============================================================================

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// What the server answers for one path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    /// Content-Length to advertise instead of the real body length
    pub declared_length: Option<usize>,
}

impl Route {
    /// 200 OK with the given content type and body.
    pub fn image(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            body,
            declared_length: None,
        }
    }

    /// 200 OK without a Content-Type header.
    pub fn untyped(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: None,
            body,
            declared_length: None,
        }
    }

    /// Empty response with the given status code.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
            declared_length: None,
        }
    }

    /// 200 OK that promises `declared_length` bytes, sends `body`, then hangs up.
    pub fn truncated(body: Vec<u8>, declared_length: usize) -> Self {
        Self {
            status: 200,
            content_type: Some("image/png".to_string()),
            body,
            declared_length: Some(declared_length),
        }
    }
}

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    user_agent: Option<String>,
}

pub struct TestServer {
    base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Starts the server on an ephemeral port in a background thread.
    /// The server runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    /// Absolute URL for `path` (which must start with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// How many requests were made for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Total number of requests served.
    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r.user_agent.clone())
            .collect()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&data);
    let Some(recorded_request) = parse_request(&request) else {
        return;
    };

    let route = routes
        .get(&recorded_request.path)
        .cloned()
        .unwrap_or_else(|| Route::status(404));
    recorded.lock().unwrap().push(recorded_request);

    let content_type = route
        .content_type
        .as_deref()
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.declared_length.unwrap_or(route.body.len()),
        content_type
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

fn parse_request(request: &str) -> Option<RecordedRequest> {
    let mut lines = request.lines();
    let target = lines.next()?.split_whitespace().nth(1)?;
    // routes are matched without the query string
    let path = target.split('?').next().unwrap_or(target).to_string();
    let mut user_agent = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    Some(RecordedRequest { path, user_agent })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
