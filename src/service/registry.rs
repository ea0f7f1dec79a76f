// SPDX-FileCopyrightText: 2026 Nodewire Contributors
// SPDX-License-Identifier: MIT

//! Command registry and dispatcher.
//!
//! Registration happens once at startup from a fixed table; duplicate
//! registration overwrites silently (last wins) so test builds can stub
//! handlers. Nothing a handler does may cross this boundary as a panic or
//! error: every outcome becomes a response envelope.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::protocol::{Command, Response};

use super::ServiceError;

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, ServiceError>> + Send>>;
pub type Handler = Arc<dyn Fn(Map<String, Value>) -> HandlerFuture + Send + Sync>;

#[derive(Default, Clone)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration wins.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub async fn dispatch(&self, command: Command) -> Response {
        let Some(handler) = self.handlers.get(&command.command_type) else {
            return Response::failure(format!(
                "No handler registered for command type '{}'",
                command.command_type
            ));
        };

        match handler(command.parameters).await {
            Ok(data) => Response::ok(data),
            Err(err) => {
                match &err {
                    ServiceError::Timeout => {
                        warn!(command = %command.command_type, "document executor timed out");
                    }
                    ServiceError::Internal(detail) => {
                        error!(command = %command.command_type, %detail, "handler failed");
                    }
                    _ => {
                        debug!(command = %command.command_type, error = %err, "command rejected");
                    }
                }
                Response::failure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Map};

    use super::{CommandRegistry, Handler, HandlerFuture};
    use crate::protocol::Command;
    use crate::service::ServiceError;

    fn constant_handler(value: serde_json::Value) -> Handler {
        Arc::new(move |_params| {
            let value = value.clone();
            Box::pin(async move { Ok(value) }) as HandlerFuture
        })
    }

    fn command(name: &str) -> Command {
        Command {
            command_type: name.to_owned(),
            parameters: Map::new(),
        }
    }

    #[tokio::test]
    async fn unknown_commands_fail_with_the_registry_message() {
        let registry = CommandRegistry::new();
        let response = registry.dispatch(command("bogus")).await;
        assert!(!response.success);
        assert_eq!(
            response.error.as_deref(),
            Some("No handler registered for command type 'bogus'")
        );
    }

    #[tokio::test]
    async fn duplicate_registration_overwrites_silently() {
        let mut registry = CommandRegistry::new();
        registry.register("ping", constant_handler(json!("first")));
        registry.register("ping", constant_handler(json!("second")));

        let response = registry.dispatch(command("ping")).await;
        assert!(response.success);
        assert_eq!(response.data, Some(json!("second")));
    }

    #[tokio::test]
    async fn handler_errors_become_failure_responses() {
        let mut registry = CommandRegistry::new();
        registry.register(
            "explode",
            Arc::new(|_params| {
                Box::pin(async { Err(ServiceError::Internal("kaboom".to_owned())) })
                    as HandlerFuture
            }),
        );

        let response = registry.dispatch(command("explode")).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("internal error: kaboom"));
    }
}
