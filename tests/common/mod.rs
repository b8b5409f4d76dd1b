use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/contacts-api");
        // Send the server's own stdio to /dev/null. Inheriting would leave the
        // long-lived server holding the test harness's captured stdout/stderr
        // pipe open, so `cargo test` never sees EOF and hangs after the tests
        // themselves have finished.
        cmd.env("CONTACTS_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Inherit environment so the server sees DATABASE_URL and JWT_SECRET
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
            match client.get(&url).send().await {
                Ok(resp) => {
                    // Ready as soon as the server answers; degraded is fine
                    if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Reap the spawned server so it does not outlive the test process.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Cases that need live storage skip themselves when no database is configured
#[allow(dead_code)]
pub fn database_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

/// Unique per-run email so repeated test runs never collide on constraints
#[allow(dead_code)]
pub fn unique_email(prefix: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock before epoch");
    format!("{}-{}-{}@example.com", prefix, now.as_secs(), now.subsec_nanos())
}

/// Register a fresh user and log in, returning (user_id, bearer token)
#[allow(dead_code)]
pub async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    prefix: &str,
) -> Result<(i64, String)> {
    let email = unique_email(prefix);
    let password = "integration-pw";

    let res = client
        .post(format!("{}/auth/register", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed with {}",
        res.status()
    );
    let body = res.json::<serde_json::Value>().await?;
    let user_id = body["data"]["id"].as_i64().context("missing user id")?;

    let res = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed with {}", res.status());
    let body = res.json::<serde_json::Value>().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("missing token")?
        .to_string();

    Ok((user_id, token))
}
