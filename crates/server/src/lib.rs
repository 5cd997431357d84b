//! Roastery server library.
//!
//! This crate provides the coffee-shop backend as a library, allowing it to be
//! tested and reused; the `roastery-server` binary is a thin wrapper around it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
