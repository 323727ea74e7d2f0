//! # Client Compat Service
//!
//! Typed client bindings for `twirp.clientcompat.CompatService`, the service used by the
//! Twirp project to check that client implementations interoperate with its servers:
//!
//! ```proto
//! package twirp.clientcompat;
//!
//! message Empty {}
//! message Req { string v = 1; }
//! message Resp { int32 v = 1; }
//!
//! service CompatService {
//!   rpc Method(Req) returns (Resp);
//!   rpc NoopMethod(Empty) returns (Empty);
//! }
//! ```
//!
//! The crate also ships the schema itself as a `FileDescriptorSet`, so the dynamic client
//! in `twirpc-core` can call the same service without the generated types.
pub mod client;
pub mod pb;

pub use client::{CompatServiceClient, SERVICE_NAME};
pub use pb::{Empty, Req, Resp};
