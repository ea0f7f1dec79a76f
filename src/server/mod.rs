// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Line-oriented TCP front end.
//!
//! Each connection reads one JSON command per line and writes one JSON
//! response per line, in order. Connections are independent; ordering is
//! only guaranteed within a connection, and actual document mutations are
//! serialized behind the executor regardless of connection count.

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::protocol::{decode_line, encode_response, DecodeError, Response};
use crate::service::CommandRegistry;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 8720,
            max_connections: 32,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Accept connections until ctrl-c.
pub async fn serve(config: ServerConfig, registry: CommandRegistry) -> io::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    let local = listener.local_addr()?;
    info!(%local, "listening");
    run_listener(listener, config.max_connections, registry).await
}

async fn run_listener(
    listener: TcpListener,
    max_connections: usize,
    registry: CommandRegistry,
) -> io::Result<()> {
    let limit = Arc::new(Semaphore::new(max_connections));
    let registry = Arc::new(registry);

    loop {
        // Hold a permit before accepting, so a full pool exerts backpressure
        // on the listen queue while ctrl-c stays observable.
        let permit = tokio::select! {
            permit = Arc::clone(&limit).acquire_owned() => {
                let Ok(permit) = permit else { break };
                permit
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
        };

        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(connection) => connection,
                Err(err) => {
                    // Transient accept failures (EMFILE, resets) must not
                    // end the service.
                    warn!(%err, "accept failed");
                    continue;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
        };

        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            debug!(%peer, "connection opened");
            if let Err(err) = handle_connection(stream, &registry).await {
                warn!(%peer, %err, "connection failed");
            }
            debug!(%peer, "connection closed");
            drop(permit);
        });
    }
    Ok(())
}

/// Drive one connection to EOF. Malformed lines get a failure envelope and
/// the connection stays open; blank lines are ignored.
pub async fn handle_connection<S>(stream: S, registry: &CommandRegistry) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let response = match decode_line(&line) {
            Ok(command) => registry.dispatch(command).await,
            Err(DecodeError::Empty) => continue,
            Err(err) => Response::failure(err.to_string()),
        };
        let mut encoded = encode_response(&response);
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tokio::io::{duplex, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};

    use super::handle_connection;
    use crate::doc::InMemoryDocument;
    use crate::service::{build_registry, DocumentExecutor, GraphService};

    fn registry() -> crate::service::CommandRegistry {
        let executor =
            DocumentExecutor::spawn(InMemoryDocument::new("session")).expect("executor");
        build_registry(GraphService::new(executor))
    }

    async fn converse(input: &str) -> Vec<Value> {
        let registry = registry();
        let (client, server) = duplex(64 * 1024);
        let driver = tokio::spawn(async move {
            handle_connection(server, &registry).await.expect("connection");
        });

        let (mut read_half, mut write_half) = tokio::io::split(client);
        write_half
            .write_all(input.as_bytes())
            .await
            .expect("write");
        write_half.shutdown().await.expect("shutdown");
        drop(write_half);

        let mut output = String::new();
        read_half.read_to_string(&mut output).await.expect("read");
        driver.await.expect("driver");

        output
            .lines()
            .map(|line| serde_json::from_str(line).expect("response line is JSON"))
            .collect()
    }

    #[tokio::test]
    async fn one_response_line_per_command_line() {
        let replies = converse(concat!(
            r#"{"type":"add_component","parameters":{"type":"slider","x":0,"y":0}}"#,
            "\n",
            r#"{"type":"get_document_info"}"#,
            "\n",
        ))
        .await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["success"], true);
        assert_eq!(replies[1]["data"]["count"], 1);
    }

    #[tokio::test]
    async fn malformed_lines_do_not_end_the_conversation() {
        let replies = converse(concat!(
            "{nope\n",
            "\n",
            r#"{"type":"get_document_info"}"#,
            "\n",
        ))
        .await;

        // The blank line is skipped entirely.
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["success"], false);
        assert!(replies[0]["error"]
            .as_str()
            .expect("error")
            .starts_with("invalid request JSON:"));
        assert_eq!(replies[1]["success"], true);
    }

    #[tokio::test]
    async fn the_accept_loop_serves_real_tcp_connections() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(super::run_listener(listener, 4, registry()));

        for _ in 0..2 {
            let stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
            let (read_half, mut write_half) = stream.into_split();
            write_half
                .write_all(b"{\"type\":\"get_document_info\"}\n")
                .await
                .expect("write");

            let mut line = String::new();
            BufReader::new(read_half).read_line(&mut line).await.expect("read");
            let reply: Value = serde_json::from_str(line.trim_end()).expect("reply");
            assert_eq!(reply["success"], true);
        }
    }

    #[tokio::test]
    async fn requests_on_one_connection_are_answered_in_order() {
        let mut input = String::new();
        for _ in 0..5 {
            input.push_str(r#"{"type":"add_component","parameters":{"type":"slider","x":0,"y":0}}"#);
            input.push('\n');
        }
        input.push_str(r#"{"type":"assert_component_count","parameters":{"expected":5}}"#);
        input.push('\n');

        let replies = converse(&input).await;
        assert_eq!(replies.len(), 6);
        assert_eq!(replies[5]["data"]["passed"], true);
    }
}
