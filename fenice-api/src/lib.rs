//! # Fenice API Server Library
//!
//! HTTP surface of the Fenice community dashboard. The handlers are thin:
//! they authenticate the request, validate the body, call one operation of
//! `fenice_shared` with the acting family's context, and map the result.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
