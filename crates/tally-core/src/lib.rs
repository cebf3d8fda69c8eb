//! Core types and the authorization and referential-integrity layer for the
//! Tally restaurant ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Operations are plain functions over a [`store::Repository`]; a backend
//! runs them inside a transaction through [`store::Store`].

pub mod access;
pub mod bootstrap;
pub mod consistency;
pub mod error;
pub mod exists;
pub mod model;
pub mod ops;
pub mod store;

pub use error::{Error, Result};
