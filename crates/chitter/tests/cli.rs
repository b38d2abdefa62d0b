//! Tests for the `chitter` binary: argument handling and client-mode exit.

use std::io::Read;
use std::net::TcpListener;
use std::process::{Command as StdCommand, Stdio};
use std::time::{Duration, Instant};

use assert_cmd::Command;

fn chitter() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("chitter"))
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let output = chitter().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
}

#[test]
fn test_connect_without_port_fails() {
    chitter().args(["-c", "localhost"]).assert().failure();
}

#[test]
fn test_bad_port_fails() {
    chitter().arg("not-a-port").assert().failure();
}

#[test]
fn test_missing_config_file_fails_before_listening() {
    let output = chitter()
        .args(["--config", "/definitely/not/here.json", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("here.json"), "stderr was: {stderr}");
}

#[test]
fn test_client_exits_when_relay_closes_with_stdin_open() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin!("chitter"))
        .args(["-c", "127.0.0.1", &port])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Held open until the end of the test.
    let _stdin = child.stdin.take();

    let (stream, _) = listener.accept().unwrap();
    drop(stream);

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break Some(status);
        }
        if Instant::now() >= deadline {
            break None;
        }
        std::thread::sleep(Duration::from_millis(20));
    };
    if status.is_none() {
        child.kill().unwrap();
        child.wait().unwrap();
        panic!("client still running after the relay closed");
    }
    assert!(status.unwrap().success());

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .unwrap()
        .read_to_string(&mut stdout)
        .unwrap();
    assert!(stdout.starts_with("Connection established: "), "{stdout}");
    assert!(stdout.contains("Use Ctrl+C to disconnect from the server\n"));
    assert!(stdout.ends_with("Connection was closed...\n"), "{stdout}");
}
