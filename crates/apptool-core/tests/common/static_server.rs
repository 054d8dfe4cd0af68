//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed map of path to body. Unknown paths get 404. Paths listed as
//! flaky answer 503 a given number of times before serving their body.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
pub struct Routes {
    bodies: HashMap<String, Vec<u8>>,
    flaky: Mutex<HashMap<String, usize>>,
    hits: AtomicUsize,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `path` (leading `/` included).
    pub fn with(mut self, path: &str, body: &[u8]) -> Self {
        self.bodies.insert(path.to_string(), body.to_vec());
        self
    }

    /// Answer 503 to the first `failures` requests for `path`.
    pub fn flaky(self, path: &str, failures: usize) -> Self {
        self.flaky.lock().unwrap().insert(path.to_string(), failures);
        self
    }
}

pub struct Server {
    pub base_url: String,
    routes: Arc<Routes>,
}

impl Server {
    /// Requests served so far, any method, any status.
    pub fn hits(&self) -> usize {
        self.routes.hits.load(Ordering::SeqCst)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Starts the server on a background thread. `base_url` ends with `/`.
/// The server runs until the process exits.
pub fn start(routes: Routes) -> Server {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let shared = Arc::clone(&routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    Server {
        base_url: format!("http://127.0.0.1:{}/", port),
        routes,
    }
}

fn handle(mut stream: TcpStream, routes: &Routes) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    routes.hits.fetch_add(1, Ordering::SeqCst);

    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);

    {
        let mut flaky = routes.flaky.lock().unwrap();
        if let Some(remaining) = flaky.get_mut(path) {
            if *remaining > 0 {
                *remaining -= 1;
                let _ = stream.write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
                return;
            }
        }
    }

    let (status, body): (&str, &[u8]) = match routes.bodies.get(path) {
        Some(body) => ("200 OK", body),
        None => ("404 Not Found", b""),
    };
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(body);
    }
}
