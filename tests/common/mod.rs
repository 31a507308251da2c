#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// A server process on its own port with its own in-memory store.
/// The process is killed when the handle is dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_user-api-rust"));
        cmd.env("USER_API_HOST", "127.0.0.1")
            .env("USER_API_PORT", port.to_string())
            .env("USER_STORE", "memory")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub fn user(name: &str, email: &str, password: &str) -> Value {
    json!({ "UserName": name, "Email": email, "Password": password })
}

pub fn sample_users() -> Vec<Value> {
    vec![
        user("Alfie", "alfie@some_office.org", "passwrd1"),
        user("Joan", "joan@some_other_org.com", "passwrd2"),
        user("Tony", "tones@somewhere_completly_different.net", "passwrd3"),
    ]
}

/// Send a request with an optional JSON body and decode the JSON reply.
pub async fn send(
    server: &TestServer,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let client = reqwest::Client::new();
    let mut req = client.request(method, server.url(path));
    if let Some(body) = body {
        req = req.json(&body);
    }
    let res = req.send().await?;
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}

pub async fn user_names(server: &TestServer) -> Result<Vec<String>> {
    let (_, body) = send(server, reqwest::Method::GET, "/user/getAll", None).await?;
    let mut names: Vec<String> = body["Users"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|u| u["UserName"].as_str().map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}
