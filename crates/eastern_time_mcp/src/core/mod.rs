//! # Eastern Time Server Core
//!
//! This module renders the current America/New_York time and answers the
//! JSON-RPC methods that expose it.
//!
//! ## Features
//! - ISO 8601 timestamps with the live UTC offset (`-05:00` / `-04:00`)
//! - Automatic DST handling
//! - A closed method table: `initialize`, `tools/list`, `tools/call`
//! - Transport framing for `GET` query shortcuts and `POST` bodies
//!
//! ## Modules
//! - `dispatcher`: Method table and request handling
//! - `error`: Custom error types and error handling
//! - `models`: Request and response envelopes
//! - `provider`: Eastern time rendering
//! - `transport`: HTTP-agnostic call framing
//! - `utils`: Offset helpers and protocol constants

pub mod dispatcher;
pub mod error;
pub mod models;
pub mod provider;
pub mod transport;
pub mod utils;
