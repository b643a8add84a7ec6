use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use serde_json::Value;

fn run_lockbeat(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_lockbeat").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("lockbeat.exe");
        } else {
            path.push("lockbeat");
        }
        path.to_string_lossy().into_owned()
    });
    let mut cmd = Command::new(bin);
    cmd.args(args);
    // Isolate from any real user config
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    let output = cmd.output().expect("run lockbeat");
    (output.status.success(), output.stdout, output.stderr)
}

#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    csrf_header: Option<String>,
    body: String,
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");

    let mut content_length = 0usize;
    let mut csrf_header = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            match name.as_str() {
                "content-length" => content_length = value.parse().expect("content length"),
                "x-csrftoken" => csrf_header = Some(value),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("request body");

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        csrf_header,
        body: String::from_utf8(body).expect("utf8 body"),
    }
}

/// Accept `expected` connections, capture one request each, answer 204.
fn spawn_lock_server(
    expected: usize,
) -> (u16, Arc<Mutex<Vec<CapturedRequest>>>, std::thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let captured = Arc::new(Mutex::new(Vec::new()));
    let server_captured = Arc::clone(&captured);

    let handle = std::thread::spawn(move || {
        for _ in 0..expected {
            let (mut stream, _) = listener.accept().expect("accept");
            let request = read_request(&mut stream);
            server_captured.lock().expect("captured lock").push(request);
            let _ = stream.write_all(b"HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");
        }
    });

    (port, captured, handle)
}

#[test]
fn run_posts_refresh_requests_to_lock_endpoint() {
    let home = tempfile::tempdir().expect("temp home");
    let (port, captured, server) = spawn_lock_server(2);
    let base_url = format!("http://127.0.0.1:{port}");

    let (ok, _stdout, stderr) = run_lockbeat(
        &[
            "run",
            "--base-url",
            &base_url,
            "--path",
            "/admin/blog/post/7/change/",
            "--token",
            "t0k3n",
            "--interval-ms",
            "100",
            "--max-ticks",
            "2",
        ],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    server.join().expect("server thread");
    let captured = captured.lock().expect("captured lock");
    assert_eq!(captured.len(), 2);
    for request in captured.iter() {
        assert_eq!(
            request.request_line,
            "POST /admin/blog/post/7/change/update-lock/ HTTP/1.1"
        );
        assert_eq!(request.csrf_header.as_deref(), Some("t0k3n"));
        assert_eq!(request.body, "csrfmiddlewaretoken=t0k3n");
    }
}

#[test]
fn run_skips_non_edit_view_without_sending() {
    let home = tempfile::tempdir().expect("temp home");
    let (ok, stdout, stderr) = run_lockbeat(
        &["run", "--path", "/admin/blog/post/add/"],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let stdout = String::from_utf8_lossy(&stdout);
    assert!(stdout.contains("Not an edit view"), "stdout: {stdout}");
}

#[test]
fn run_requires_token_on_edit_view() {
    let home = tempfile::tempdir().expect("temp home");
    let (ok, _stdout, stderr) = run_lockbeat(
        &["run", "--path", "/admin/blog/post/7/change/"],
        home.path(),
    );
    assert!(!ok);
    let stderr = String::from_utf8_lossy(&stderr);
    assert!(stderr.contains("CSRF token is empty"), "stderr: {stderr}");
}

#[test]
fn run_rejects_invalid_base_url() {
    let home = tempfile::tempdir().expect("temp home");
    let (ok, _stdout, stderr) = run_lockbeat(
        &[
            "run",
            "--path",
            "/admin/blog/post/7/change/",
            "--token",
            "abc123",
            "--base-url",
            "ftp://example.com",
        ],
        home.path(),
    );
    assert!(!ok);
    let stderr = String::from_utf8_lossy(&stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {stderr}");
}

#[test]
fn inspect_json_reports_edit_view() {
    let home = tempfile::tempdir().expect("temp home");
    let (ok, stdout, stderr) = run_lockbeat(
        &[
            "inspect",
            "-j",
            "--path",
            "/admin/app/model/42/change/",
            "--token",
            "abc123",
        ],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["path"].as_str(), Some("/admin/app/model/42/change/"));
    assert_eq!(json["active"].as_bool(), Some(true));
    assert_eq!(
        json["lock_url"].as_str(),
        Some("/admin/app/model/42/change/update-lock/")
    );
    assert_eq!(json["interval_ms"].as_u64(), Some(5000));
    assert_eq!(json["token_present"].as_bool(), Some(true));
}

#[test]
fn inspect_json_reports_inactive_for_add_view() {
    let home = tempfile::tempdir().expect("temp home");
    let (ok, stdout, stderr) = run_lockbeat(
        &["inspect", "-j", "--path", "/admin/app/model/add/"],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["active"].as_bool(), Some(false));
    assert!(json["lock_url"].is_null());
    assert_eq!(json["token_present"].as_bool(), Some(false));
}

#[test]
fn config_file_supplies_interval() {
    let home = tempfile::tempdir().expect("temp home");
    let config_path = home
        .path()
        .join(".config")
        .join("lockbeat")
        .join("config.toml");
    std::fs::create_dir_all(config_path.parent().expect("parent")).expect("config dir");
    std::fs::write(&config_path, "interval_ms = 1234\n").expect("write config");

    let (ok, stdout, stderr) = run_lockbeat(
        &["inspect", "-j", "--path", "/admin/app/model/42/change/"],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["interval_ms"].as_u64(), Some(1234));
}
