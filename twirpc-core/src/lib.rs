//! # Twirpc Core
//!
//! `twirpc-core` is the foundational library behind the `twirpc` CLI and the typed
//! service stubs built on top of it. It implements the client half of the Twirp
//! protocol: Protobuf messages sent as `POST /twirp/<package.Service>/<Method>`
//! over plain HTTP, with failures described by a JSON error envelope.
//!
//! ## Key Components
//!
//! * **[`TwirpClient`]:** The generic unary client. Statically typed stubs wrap it once per
//!   RPC method, pairing it with a [`ProstCodec`] for that method's request and response types.
//! * **[`TwirpError`]:** The structured `(code, message, meta)` error returned whenever the
//!   server, or anything sitting in front of it, answers with a non-2xx status.
//! * **[`DynamicClient`]:** A schema-driven client that resolves services and methods from a
//!   `FileDescriptorSet` at runtime and exchanges `serde_json::Value` bodies.
//!
//! ## Transport
//!
//! The HTTP exchange itself sits behind the [`transport::Transport`] trait. The default
//! [`HttpTransport`] is backed by `reqwest`; timeouts, TLS and proxies are configured on the
//! `reqwest::Client` it wraps.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-reflect` and `http` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod client;
pub mod transport;
pub mod twirp;

// Re-exports
pub use client::DynamicClient;
pub use http;
pub use prost;
pub use prost_reflect;
pub use transport::HttpTransport;
pub use twirp::client::{ClientError, TwirpClient};
pub use twirp::codec::{JsonCodec, ProstCodec};
pub use twirp::error::{ErrorCode, TwirpError};

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
