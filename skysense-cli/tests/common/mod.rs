//! Shared helpers for the `skysense` integration tests.

#![allow(dead_code)]

pub use assert_cmd::Command;

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::json;
use tempfile::TempDir;

/// `skysense` binary with HOME/XDG dirs pointed at a scratch directory, so no
/// real user config leaks into the test. Keep the returned dir alive.
pub fn skysense_cmd() -> (Command, TempDir) {
    let home = tempfile::tempdir().expect("Failed to create temp home");
    let mut cmd = Command::cargo_bin("skysense").expect("Failed to find skysense binary");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("SKYSENSE_ENDPOINT")
        .env_remove("RUST_LOG");
    (cmd, home)
}

/// Endpoint on a port nothing listens on.
pub fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/chat")
}

/// Serve `POST /api/chat` on a background runtime; returns its URL.
pub fn spawn_backend(status: StatusCode, body: serde_json::Value) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let app = Router::new().route(
                "/api/chat",
                post(move || {
                    let body = body.clone();
                    async move { (status, Json(body)) }
                }),
            );
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{addr}/api/chat")
}

pub fn reply_backend(reply: &str) -> String {
    spawn_backend(StatusCode::OK, json!({ "reply": reply }))
}
