use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use envq_service::{iso_timestamp, EnvironmentalQualityService};
use serde_json::{json, Value};
use tokio::runtime::{Handle, Runtime};
use tracing::{debug, error, info, warn};

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3000";
const READ_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_BODY_BYTES: usize = 64 * 1024;

const MISSING_PARAMS: &str = "Missing required parameters: lat and lng";
const INVALID_PARAMS: &str = "Invalid coordinates: lat and lng must be valid numbers";
const FETCH_FAILED: &str = "Failed to fetch environmental quality data";

/// `ENVQ_HTTP_ADDR` wins; a bare `PORT` binds every interface on that port.
pub fn listen_addr(http_addr: Option<String>, port: Option<String>) -> String {
    if let Some(addr) = http_addr.filter(|a| !a.trim().is_empty()) {
        return addr;
    }
    match port.and_then(|p| p.trim().parse::<u16>().ok()) {
        Some(port) => format!("0.0.0.0:{port}"),
        None => DEFAULT_HTTP_ADDR.to_string(),
    }
}

/// Blocking HTTP/1.1 front end. Every accepted connection is answered on its
/// own thread; the aggregator runs on an owned tokio runtime shared by all of
/// them.
pub struct HttpServer {
    handler: RequestHandler,
    _runtime: Runtime,
}

impl HttpServer {
    pub fn new(service: EnvironmentalQualityService) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let handler = RequestHandler {
            service,
            runtime: runtime.handle().clone(),
        };
        Ok(Self {
            handler,
            _runtime: runtime,
        })
    }

    pub fn serve(&self, addr: &str) -> io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "envqd listening");
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(err) => {
                    error!(error = %err, "http accept error");
                }
            }
        }
        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let handler = self.handler.clone();
        let spawned = thread::Builder::new()
            .name("envqd-conn".to_string())
            .spawn(move || {
                if let Err(err) = handler.handle_connection(stream) {
                    warn!(error = %err, "http request error");
                }
            });
        if let Err(err) = spawned {
            error!(error = %err, "connection thread spawn failed");
        }
    }
}

/// Per-connection view of the server: the aggregator plus a handle into the
/// runtime that drives it.
#[derive(Clone)]
struct RequestHandler {
    service: EnvironmentalQualityService,
    runtime: Handle,
}

impl RequestHandler {
    fn handle_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        let Some(req) = read_http_request(&stream)? else {
            return Ok(());
        };
        let response = self.dispatch(&req);
        info!(
            method = %req.method,
            path = %req.path,
            status = response.status,
            "http request"
        );
        write_http_response(&mut stream, &response)
    }

    fn dispatch(&self, req: &HttpRequest) -> HttpResponse {
        if req.method == "OPTIONS" {
            return HttpResponse::empty(204);
        }
        match (req.method.as_str(), req.path.as_str()) {
            ("GET", "/health") => HttpResponse::json(
                200,
                &json!({"status": "healthy", "timestamp": iso_timestamp(&Utc::now())}),
            ),
            ("GET", "/api/environmental-quality") => self.environmental_quality(&req.query),
            (_, "/health" | "/api/environmental-quality") => {
                HttpResponse::json(405, &json!({"error": "method_not_allowed"}))
            }
            _ => HttpResponse::json(404, &json!({"error": "not_found"})),
        }
    }

    fn environmental_quality(&self, query: &HashMap<String, String>) -> HttpResponse {
        let (latitude, longitude) = match coordinate_params(query) {
            Ok(v) => v,
            Err(message) => return HttpResponse::json(400, &json!({"error": message})),
        };

        match self
            .runtime
            .block_on(self.service.assess(latitude, longitude))
        {
            Ok(report) => match serde_json::to_value(report.to_report()) {
                Ok(body) => HttpResponse::json(200, &body),
                Err(err) => {
                    error!(error = %err, "report serialization failed");
                    fetch_failed(&err.to_string())
                }
            },
            Err(err) if err.is_invalid_input() => {
                debug!(error = %err, "rejected coordinates");
                HttpResponse::json(400, &json!({"error": err.to_string()}))
            }
            Err(err) => {
                error!(error = %err, latitude, longitude, "environmental quality lookup failed");
                fetch_failed(&err.to_string())
            }
        }
    }
}

fn fetch_failed(message: &str) -> HttpResponse {
    HttpResponse::json(500, &json!({"error": FETCH_FAILED, "message": message}))
}

/// Both parameters must be present and non-empty, then parse as finite numbers.
fn coordinate_params(query: &HashMap<String, String>) -> Result<(f64, f64), &'static str> {
    let param = |name: &str| query.get(name).map(String::as_str).filter(|v| !v.is_empty());
    let (Some(lat), Some(lng)) = (param("lat"), param("lng")) else {
        return Err(MISSING_PARAMS);
    };
    let parse = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    match (parse(lat), parse(lng)) {
        (Some(lat), Some(lng)) => Ok((lat, lng)),
        _ => Err(INVALID_PARAMS),
    }
}

#[derive(Debug)]
struct HttpRequest {
    method: String,
    path: String,
    query: HashMap<String, String>,
}

struct HttpResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl HttpResponse {
    fn json(status: u16, value: &Value) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: Vec::new(),
        }
    }
}

fn read_http_request(stream: &TcpStream) -> io::Result<Option<HttpRequest>> {
    let mut reader = io::BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let first = line.trim_end_matches(['\r', '\n']);
    if first.is_empty() {
        return Ok(None);
    }

    let mut parts = first.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line",
        ));
    };
    let (path, query) = parse_path_query(target);

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        if let Some(len) = parse_content_length(header) {
            content_length = len;
        }
    }

    // Bodies are ignored by every route but still drained.
    if content_length > 0 {
        let mut sink = vec![0_u8; content_length.min(MAX_BODY_BYTES)];
        reader.read_exact(&mut sink)?;
    }
    Ok(Some(HttpRequest {
        method: method.to_ascii_uppercase(),
        path,
        query,
    }))
}

fn parse_content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

fn write_http_response(stream: &mut TcpStream, response: &HttpResponse) -> io::Result<()> {
    let headers = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Access-Control-Allow-Methods: GET, OPTIONS\r\n\
         Access-Control-Allow-Headers: Content-Type\r\n\
         Connection: close\r\n\r\n",
        response.status,
        http_reason_phrase(response.status),
        response.content_type,
        response.body.len()
    );
    stream.write_all(headers.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}

fn http_reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Query pairs are `application/x-www-form-urlencoded`; a repeated key keeps
/// its last value.
fn parse_path_query(raw: &str) -> (String, HashMap<String, String>) {
    let (path, query_str) = match raw.split_once('?') {
        Some((p, q)) => (p.to_string(), q),
        None => (raw.to_string(), ""),
    };
    let query = form_urlencoded::parse(query_str.as_bytes())
        .into_owned()
        .collect();
    (path, query)
}
