//! One-shot loopback HTTP server for exercising the client without a backend.

use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread::{self, JoinHandle},
};

/// What the client sent
#[derive(Debug, Default)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Serve a single canned response. Returns the base URL (`http://127.0.0.1:<port>/api`)
/// and a handle yielding the request that was received.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<RecordedRequest>) {
    serve_bytes_once(status, body.as_bytes())
}

/// Same as [`serve_once`] for bodies that are not valid UTF-8
pub fn serve_bytes_once(status: u16, body: &[u8]) -> (String, JoinHandle<RecordedRequest>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let body = body.to_vec();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut recorded = RecordedRequest::default();

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut parts = request_line.split_whitespace();
        recorded.method = parts.next().unwrap_or_default().to_string();
        recorded.path = parts.next().unwrap_or_default().to_string();

        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                recorded
                    .headers
                    .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        let chunked = recorded
            .headers
            .get("transfer-encoding")
            .is_some_and(|v| v.eq_ignore_ascii_case("chunked"));

        let mut buf = Vec::new();
        if chunked {
            loop {
                let mut size_line = String::new();
                reader.read_line(&mut size_line).unwrap();
                let size = usize::from_str_radix(size_line.trim(), 16).unwrap();
                let mut chunk = vec![0; size + 2];
                reader.read_exact(&mut chunk).unwrap();
                if size == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..size]);
            }
        } else {
            let content_length = recorded
                .headers
                .get("content-length")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            buf.resize(content_length, 0);
            reader.read_exact(&mut buf).unwrap();
        }
        recorded.body = String::from_utf8(buf).unwrap();

        let head = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            reason(status),
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();

        recorded
    });

    (format!("http://127.0.0.1:{port}/api"), handle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
