//! Test server management.
//!
//! Runs a relayd gateway in-process on an ephemeral port.

use relayd::config::{Config, OperBlock};
use relayd::network::Gateway;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Connection password used by every test server.
pub const PASSWORD: &str = "letmein";

/// A test server instance. Shut down on drop.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a server with default limits.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a server after letting `tweak` adjust the configuration.
    pub async fn spawn_with(tweak: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.server.name = "test.server".to_string();
        config.server.password = PASSWORD.to_string();
        config.listen.host = "127.0.0.1".parse()?;
        config.listen.port = 0;
        config.oper.push(OperBlock {
            name: "testop".to_string(),
            password: "testpass".to_string(),
        });
        tweak(&mut config);

        let gateway = Gateway::bind(&config).await?;
        let addr = gateway.local_addr()?;
        let (tx, rx) = oneshot::channel();
        let task = tokio::spawn(gateway.run_until(async {
            let _ = rx.await;
        }));

        Ok(Self {
            addr,
            shutdown: Some(tx),
            task,
        })
    }

    /// Address clients should connect to.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.abort();
    }
}
