#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        // Nothing listens here, so every query fails fast
        let db_port = portpicker::pick_unused_port().context("failed to pick database port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_planner-api"));
        cmd.arg("serve")
            .env("APP_ENV", "development")
            .env("API_HOST", "127.0.0.1")
            .env("API_PORT", port.to_string())
            .env("AUTH_USERNAME", USERNAME)
            .env("AUTH_PASSWORD", PASSWORD)
            .env("DB_HOST", "127.0.0.1")
            .env("DB_PORT", db_port.to_string())
            .env("DATABASE_CONNECTION_TIMEOUT", "1")
            .env_remove("DATABASE_URL")
            .env_remove("AUTH_USERS")
            .env_remove("AUTH_PASSWORD_HASH")
            .env_remove("API_URL_PREFIX")
            .env_remove("API_VERSION")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
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
            // Any response at all means the listener is up
            if client.get(format!("{}/", self.base_url)).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}

/// Client that sends the test credentials and does not follow redirects
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

pub fn get(server: &TestServer, path: &str) -> reqwest::RequestBuilder {
    client().get(server.url(path)).basic_auth(USERNAME, Some(PASSWORD))
}
