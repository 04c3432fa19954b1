//! In-process HTTP stub used by the feedback client tests and, through a
//! `#[path]` module, by the `coach` binary's integration tests.
//!
//! Each queued reply serves exactly one connection, in order, and always
//! answers with `Connection: close` so the client never reuses a socket.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// What the stub does with the next connection
pub enum Reply {
    Json {
        status: u16,
        reason: &'static str,
        body: String,
    },
    /// Answer `{"output": <message>}` using the message from the request
    Echo,
    /// Read the request, then hold the socket open without answering
    Hang(Duration),
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Json {
            status: 200,
            reason: "OK",
            body: body.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct StubServer {
    pub base_url: String,
    requests: mpsc::Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let tx = tx.clone();
                thread::spawn(move || serve(stream, reply, tx));
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests: rx,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server saw no request")
    }
}

/// An address nothing is listening on
pub fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);
    format!("http://{}{}", addr, path)
}

fn serve(stream: TcpStream, reply: Reply, tx: mpsc::Sender<CapturedRequest>) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stub stream"));
    let request = read_request(&mut reader);
    let message = serde_json::from_str::<serde_json::Value>(&request.body)
        .ok()
        .and_then(|v| v["inputs"]["message"].as_str().map(str::to_string));
    let _ = tx.send(request);

    let mut stream = stream;
    match reply {
        Reply::Json {
            status,
            reason,
            body,
        } => write_response(&mut stream, status, reason, &body),
        Reply::Echo => {
            let body = serde_json::json!({ "output": message.unwrap_or_default() }).to_string();
            write_response(&mut stream, 200, "OK", &body);
        }
        Reply::Hang(duration) => thread::sleep(duration),
    }
}

fn read_request(reader: &mut BufReader<TcpStream>) -> CapturedRequest {
    let mut request_line = String::new();
    let _ = reader.read_line(&mut request_line);

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    let _ = reader.read_exact(&mut body);

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn write_response(stream: &mut TcpStream, status: u16, reason: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
