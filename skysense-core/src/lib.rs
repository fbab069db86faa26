//! Core library for the `skysense` chat client.
//!
//! This crate defines:
//! - The reply-to-theme classifier
//! - Wire models for the chat endpoint
//! - Abstraction over the chat backend, plus its HTTP implementation
//! - Configuration handling
//!
//! It is used by `skysense-cli`, but can also be reused by other frontends.

pub mod backend;
pub mod config;
pub mod exchange;
pub mod model;
pub mod theme;

pub use backend::{ChatBackend, HttpChatBackend};
pub use config::{Config, ConfigError};
pub use exchange::{FALLBACK_REPLY, exchange};
pub use model::{ChatOutcome, ChatRequest, ChatResponse};
pub use theme::{ThemeLabel, UnknownTheme, classify};
