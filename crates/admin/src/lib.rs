//! Order Desk Admin library.
//!
//! This crate provides the operator web interface as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds a WRITE token for the document store:
//! - Status changes and deletes are applied to the live dataset
//! - A single operator account guards every page
//!
//! Only deploy behind a private network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod sanity;
pub mod services;
pub mod state;
pub mod store;
