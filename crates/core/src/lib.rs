//! Roastery Core - Shared types library.
//!
//! Common types used by the Roastery server and its tests. This crate contains
//! only types - no I/O, no database access, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
