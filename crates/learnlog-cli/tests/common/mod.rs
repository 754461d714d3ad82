//! Sandboxed environment and a canned backend for running the `learnlog` binary.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;

/// Temp HOME and XDG dirs, so runs never touch the real config or session.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn data_home(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_home().join("learnlog").join("config.toml")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_home().join("learnlog").join("offline.json")
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_home().join("learnlog").join("session.json")
    }

    pub fn write_config(&self, contents: &str) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().expect("config parent")).expect("mkdir");
        std::fs::write(path, contents).expect("write config");
    }

    pub fn write_session(&self, token: &str) {
        let path = self.session_path();
        std::fs::create_dir_all(path.parent().expect("session parent")).expect("mkdir");
        let body = format!(
            r#"{{"token":"{}","user":{{"username":"ada","email":"ada@example.com"}},"created_at":"2024-03-01T00:00:00Z"}}"#,
            token
        );
        std::fs::write(path, body).expect("write session");
    }

    /// A `learnlog` command pointed at `url`.
    pub fn cmd(&self, url: &str) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_learnlog"));
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("LEARNLOG_URL", url)
            .env("NO_COLOR", "1")
            .env_remove("LEARNLOG_CONFIG")
            .env_remove("LEARNLOG_OFFLINE_PATH")
            .env_remove("LEARNLOG_PASSWORD")
            .env_remove("LEARNLOG_LOG")
            .env_remove("EDITOR")
            .env_remove("VISUAL");
        cmd
    }

    pub fn run(&self, url: &str, args: &[&str]) -> Output {
        self.cmd(url).args(args).output().expect("run learnlog")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Value of the first `key=value` line.
pub fn field(output: &Output, key: &str) -> Option<String> {
    let prefix = format!("{}=", key);
    stdout(output)
        .lines()
        .find_map(|line| line.strip_prefix(&prefix).map(str::to_string))
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
        output.status.code(),
        stdout(output),
        stderr(output)
    );
}

pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

/// Answers one connection per reply, in order, then stops listening.
pub struct CannedServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Option<JoinHandle<()>>,
}

impl CannedServer {
    pub fn start(replies: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            for (status, body) in replies {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request = read_request(&mut stream);
                seen.lock().expect("lock").push(request);
                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            url,
            requests,
            handle: Some(handle),
        }
    }

    /// Wait for the server thread and return every request it saw.
    pub fn finish(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.requests.lock().expect("lock").clone()
    }
}

/// An address with nothing listening on it.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn read_request(stream: &mut TcpStream) -> String {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&data).into_owned()
}
