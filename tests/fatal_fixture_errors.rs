//! Runs the server binary and checks the exit status when a fixture
//! disappears under `mocks.fatal_fixture_errors = true`.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const DEADLINE: Duration = Duration::from_secs(10);

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn spawn_server(root: &Path, port: u16, fatal: bool) -> Child {
    Command::new(env!("CARGO_BIN_EXE_fixture_mock_server"))
        .env("MOCK_CONFIG", root.join("no-such-config"))
        .env("MOCK_SERVER__HOST", "127.0.0.1")
        .env("MOCK_SERVER__PORT", port.to_string())
        .env("MOCK_MOCKS__ROOT", root.join("mocks"))
        .env("MOCK_MOCKS__FATAL_FIXTURE_ERRORS", fatal.to_string())
        .env("MOCK_LOGGING__SHOW_ROUTES", "false")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap()
}

fn connect(port: u16) -> TcpStream {
    let started = Instant::now();
    loop {
        match TcpStream::connect(("127.0.0.1", port)) {
            Ok(stream) => return stream,
            Err(e) if started.elapsed() > DEADLINE => panic!("server never came up: {e}"),
            Err(_) => thread::sleep(Duration::from_millis(50)),
        }
    }
}

fn get(port: u16, path: &str) -> String {
    let mut stream = connect(port);
    stream.set_read_timeout(Some(DEADLINE)).unwrap();
    write!(stream, "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").unwrap();
    let mut response = String::new();
    let _ = stream.read_to_string(&mut response);
    response
}

fn wait_exit(child: &mut Child) -> Option<ExitStatus> {
    let started = Instant::now();
    while started.elapsed() < DEADLINE {
        if let Some(status) = child.try_wait().unwrap() {
            return Some(status);
        }
        thread::sleep(Duration::from_millis(50));
    }
    None
}

#[test]
fn test_deleted_fixture_stops_server_with_code_1() {
    let dir = ScratchDir::new("fixture-mock-fatal");
    let fixture = dir.0.join("mocks/gone/endpoint.json");
    std::fs::create_dir_all(fixture.parent().unwrap()).unwrap();
    std::fs::write(&fixture, r#"{"GET": {"ok": true}}"#).unwrap();

    let port = free_port();
    let mut child = spawn_server(&dir.0, port, true);

    assert!(get(port, "/gone").starts_with("HTTP/1.1 200"));

    std::fs::remove_file(&fixture).unwrap();
    let _ = get(port, "/gone");

    let status = wait_exit(&mut child);
    if status.is_none() {
        let _ = child.kill();
    }
    assert_eq!(status.and_then(|s| s.code()), Some(1));
}

#[test]
fn test_deleted_fixture_answers_500_by_default() {
    let dir = ScratchDir::new("fixture-mock-lenient");
    let fixture = dir.0.join("mocks/gone/endpoint.json");
    std::fs::create_dir_all(fixture.parent().unwrap()).unwrap();
    std::fs::write(&fixture, r#"{"GET": 1}"#).unwrap();

    let port = free_port();
    let mut child = spawn_server(&dir.0, port, false);

    std::fs::remove_file(&fixture).unwrap();
    let response = get(port, "/gone");
    let still_running = child.try_wait().unwrap().is_none();
    let _ = child.kill();
    let _ = child.wait();

    assert!(response.starts_with("HTTP/1.1 500"), "got: {response}");
    assert!(still_running);
}
