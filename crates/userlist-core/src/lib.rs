//! # userlist-core
//!
//! Core types and utilities for querying a user-listing API.
//!
//! This crate provides the error type, HTTP client configuration, the filter
//! fields and request-URL builder, and the JSON highlighter used to render
//! responses.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`client`] - HTTP client configuration and timeouts
//! - [`config`] - Validated endpoint configuration
//! - [`query`] - Filter fields and request-URL construction
//! - [`highlight`] - Pretty-printing and syntax highlighting of JSON payloads

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod highlight;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
pub use query::{FilterField, FilterForm, RequestUrl};
