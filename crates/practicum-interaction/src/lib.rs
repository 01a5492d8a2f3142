//! Backend adapter layer for Practicum.
//!
//! This crate talks to the external counseling backend over HTTP and
//! implements the capability traits defined in `practicum-core`.

mod client;

pub use client::HttpBackend;
