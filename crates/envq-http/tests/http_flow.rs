use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

fn reserve_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve addr");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr.to_string()
}

fn wait_for_http(addr: &str) {
    for _ in 0..80 {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    panic!("http server not ready on {addr}");
}

fn send_http(addr: &str, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect http");
    let request =
        format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).expect("write request");
    stream.flush().expect("flush");
    let mut buf = String::new();
    stream.read_to_string(&mut buf).expect("read response");
    buf
}

fn response_body(response: &str) -> &str {
    response.split("\r\n\r\n").nth(1).unwrap_or("")
}

fn response_header(response: &str) -> &str {
    response.split("\r\n\r\n").next().unwrap_or("")
}

/// Every upstream points at a closed local port so lookups fail fast.
fn spawn_envqd(addr: &str) -> Child {
    let dead = format!("http://{}", reserve_addr());
    spawn_envqd_with_upstream(addr, &dead, "2000")
}

fn spawn_envqd_with_upstream(addr: &str, upstream: &str, timeout_ms: &str) -> Child {
    Command::new(env!("CARGO_BIN_EXE_envqd"))
        .env("GOOGLE_API_KEY", "test-key")
        .env("ENVQ_HTTP_ADDR", addr)
        .env("ENVQ_AIR_BASE_URL", upstream)
        .env("ENVQ_GEOCODING_BASE_URL", upstream)
        .env("ENVQ_EPA_BASE_URL", upstream)
        .env("ENVQ_HTTP_TIMEOUT_MS", timeout_ms)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn envqd")
}

#[test]
fn http_health_and_parameter_validation_work() {
    let addr = reserve_addr();
    let mut child = spawn_envqd(&addr);
    wait_for_http(&addr);

    let health = send_http(&addr, "GET", "/health");
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(response_header(&health).contains("Access-Control-Allow-Origin: *"));
    let body: serde_json::Value = serde_json::from_str(response_body(&health)).expect("health json");
    assert_eq!(body["status"], "healthy");

    let missing = send_http(&addr, "GET", "/api/environmental-quality?lat=40.7");
    assert!(missing.starts_with("HTTP/1.1 400"), "{missing}");
    assert!(response_body(&missing).contains("Missing required parameters: lat and lng"));

    let invalid = send_http(&addr, "GET", "/api/environmental-quality?lat=north&lng=west");
    assert!(invalid.starts_with("HTTP/1.1 400"), "{invalid}");
    assert!(response_body(&invalid).contains("lat and lng must be valid numbers"));

    let out_of_range = send_http(&addr, "GET", "/api/environmental-quality?lat=91&lng=0");
    assert!(out_of_range.starts_with("HTTP/1.1 400"), "{out_of_range}");
    assert!(response_body(&out_of_range).contains("Latitude must be between -90 and 90"));

    let unknown = send_http(&addr, "GET", "/api/other");
    assert!(unknown.starts_with("HTTP/1.1 404"), "{unknown}");
    assert!(response_body(&unknown).contains("\"not_found\""));

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn http_upstream_outage_is_reported_as_server_error() {
    let addr = reserve_addr();
    let mut child = spawn_envqd(&addr);
    wait_for_http(&addr);

    let response = send_http(&addr, "GET", "/api/environmental-quality?lat=40.7128&lng=-74.0060");
    assert!(response.starts_with("HTTP/1.1 500"), "{response}");
    let body: serde_json::Value = serde_json::from_str(response_body(&response)).expect("json");
    assert_eq!(body["error"], "Failed to fetch environmental quality data");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.starts_with("Failed to fetch air quality data"), "{message}");
    assert!(!message.contains("test-key"), "{message}");

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn health_answers_while_an_assessment_is_pending() {
    // Connections queue in the backlog and never get a reply.
    let stalled = TcpListener::bind("127.0.0.1:0").expect("bind stalled upstream");
    let upstream = format!("http://{}", stalled.local_addr().expect("stalled addr"));

    let addr = reserve_addr();
    let mut child = spawn_envqd_with_upstream(&addr, &upstream, "3000");
    wait_for_http(&addr);

    let pending_addr = addr.clone();
    let pending = std::thread::spawn(move || {
        send_http(
            &pending_addr,
            "GET",
            "/api/environmental-quality?lat=40.7128&lng=-74.0060",
        )
    });
    std::thread::sleep(Duration::from_millis(300));

    let started = Instant::now();
    let health = send_http(&addr, "GET", "/health");
    let elapsed = started.elapsed();
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(elapsed < Duration::from_millis(1500), "health took {elapsed:?}");
    assert!(!pending.is_finished(), "assessment finished before the upstream timeout");

    let assessment = pending.join().expect("pending request");
    assert!(assessment.starts_with("HTTP/1.1 500"), "{assessment}");

    let _ = child.kill();
    let _ = child.wait();
    drop(stalled);
}

#[test]
fn envqd_refuses_to_start_without_api_key() {
    let status = Command::new(env!("CARGO_BIN_EXE_envqd"))
        .env_remove("GOOGLE_API_KEY")
        .env("ENVQ_HTTP_ADDR", reserve_addr())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("run envqd");
    assert!(!status.success());
}

#[test]
fn envqd_reads_settings_from_dotenv_file() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let workdir = std::env::temp_dir().join(format!("envqd-dotenv-{now}"));
    std::fs::create_dir_all(&workdir).expect("create workdir");

    let addr = reserve_addr();
    let dead = format!("http://{}", reserve_addr());
    std::fs::write(
        workdir.join(".env"),
        format!(
            "GOOGLE_API_KEY=dotenv-key\nENVQ_HTTP_ADDR={addr}\nENVQ_AIR_BASE_URL={dead}\n\
             ENVQ_GEOCODING_BASE_URL={dead}\nENVQ_EPA_BASE_URL={dead}\n"
        ),
    )
    .expect("write .env");

    let mut child = Command::new(env!("CARGO_BIN_EXE_envqd"))
        .current_dir(&workdir)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("ENVQ_HTTP_ADDR")
        .env_remove("PORT")
        .env_remove("ENVQ_AIR_BASE_URL")
        .env_remove("ENVQ_GEOCODING_BASE_URL")
        .env_remove("ENVQ_EPA_BASE_URL")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn envqd");
    wait_for_http(&addr);

    let health = send_http(&addr, "GET", "/health");
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");

    let _ = child.kill();
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(&workdir);
}
