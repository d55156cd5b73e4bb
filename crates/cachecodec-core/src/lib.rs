//! `cachecodec` core
//!
//! Composable, reversible mappings and the byte serializers built from
//! them.
//!
//! # Overview
//!
//! - **Transformers**: [`Transformer<A, B>`] maps `A` to `B` and back,
//!   either direction possibly failing. [`Transformer::and_then`] chains
//!   two of them; [`Pure`] and [`Fallible`] build one from plain functions.
//! - **Serializers**: [`Serializer<T>`] is any transformer whose second type
//!   is [`Bytes`], with `to` / `from` as its two directions.
//! - **Codecs**: ready-made serializers for unit, `i32`, `i64`, UTF-8 text,
//!   timestamps, raw and shared buffers, and [`SequenceSerializer`] for
//!   ordered sequences of any of them.
//! - **Errors**: [`CodecError`] separates encode failures, malformed input
//!   ([`DecodeError`]) and failures inside a composition.
//!
//! # Example
//!
//! ```
//! use cachecodec_core::codec::{I32_SEQUENCE, TIMESTAMP, UTF8};
//! use cachecodec_core::{Serializer, Timestamp};
//!
//! let bytes = I32_SEQUENCE.to(vec![1, 2, 3]).unwrap();
//! assert_eq!(I32_SEQUENCE.from(bytes).unwrap(), vec![1, 2, 3]);
//!
//! let bytes = UTF8.to("ok".to_owned()).unwrap();
//! assert_eq!(bytes, b"ok");
//!
//! let now = Timestamp::now();
//! assert_eq!(TIMESTAMP.from(TIMESTAMP.to(now).unwrap()).unwrap(), now);
//! ```
//!
//! # Modules
//!
//! - [`transformer`] - The [`Transformer`] trait and its combinators
//! - [`codec`] - Primitive and sequence serializers
//! - [`buffer`] - [`SharedBuffer`], the zero-copy buffer view
//! - [`config`] - [`DecodeLimits`]
//! - [`error`] - Error types ([`CodecError`], [`DecodeError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod serializer;
pub mod time;
pub mod transformer;


// Re-export commonly used types
pub use buffer::SharedBuffer;
pub use config::DecodeLimits;
pub use error::{CodecError, CodecResult, DecodeError, Direction};
pub use serializer::{Bytes, Serializer};
pub use time::Timestamp;
pub use transformer::{AndThen, Fallible, Identity, Inverse, Pure, Transformer};
