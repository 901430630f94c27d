//! Test client.
//!
//! Provides a line-based client for integration testing that can send
//! commands and assert on received responses.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

use super::server::PASSWORD;

/// A test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

impl TestClient {
    /// Connect to a test server and consume the greeting.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let mut client = Self::connect_raw(address, nick).await?;
        let greeting = client.recv().await?;
        anyhow::ensure!(
            greeting.ends_with("NOTICE * :You must log in with PASS first"),
            "unexpected greeting: {greeting}"
        );
        Ok(client)
    }

    /// Connect without reading anything.
    pub async fn connect_raw(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        // Split stream for reading and writing
        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);
        let writer = BufWriter::new(write_half);

        Ok(Self {
            reader,
            writer,
            nick: nick.to_string(),
        })
    }

    /// Send a raw line, adding CRLF if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Write bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "connection closed by server");
        anyhow::ensure!(line.ends_with("\r\n"), "line not CRLF-terminated: {line:?}");
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Expect nothing to arrive for a short while.
    pub async fn expect_silence(&mut self) -> anyhow::Result<()> {
        match self.recv_timeout(Duration::from_millis(200)).await {
            Ok(line) => anyhow::bail!("expected silence, got {line:?}"),
            Err(_) => Ok(()),
        }
    }

    /// Wait until the server closes the connection.
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
            if n == 0 {
                return Ok(());
            }
        }
    }

    /// PASS, NICK and USER, consuming every reply through the welcome burst.
    pub async fn register(&mut self) -> anyhow::Result<()> {
        self.send_raw(&format!("PASS {PASSWORD}")).await?;
        self.recv().await?;
        let nick = self.nick.clone();
        self.send_raw(&format!("NICK {nick}")).await?;
        self.recv().await?;
        self.send_raw(&format!("USER {nick} localhost test.server :{nick} Test"))
            .await?;
        self.recv_until(|line| line.contains(" 003 ")).await?;
        Ok(())
    }

    /// Own reply prefix once registered.
    pub fn prefix(&self) -> String {
        format!(":{0}!{0}@localhost ", self.nick)
    }

    /// Get the client's nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }
}
