//! # Generic Twirp Transport
//!
//! This module contains the low-level building blocks for performing Twirp calls.
//!
//! The client is agnostic to the messages being exchanged: everything message-specific is
//! delegated to a [`codec::Codec`], either a statically typed [`codec::ProstCodec`] used by
//! generated stubs or a [`codec::JsonCodec`] driven by runtime descriptors.
pub mod client;
pub mod codec;
pub mod error;
