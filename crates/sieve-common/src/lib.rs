//! Common utilities for the Sieve text extractor.
//!
//! This crate provides shared infrastructure used by the extractor and its tools:
//! - **Warning System** - per-document diagnostics and colored terminal output
//! - **URL Resolution** - relative-to-absolute link resolution and domain parsing
//! - **Networking** - blocking document fetches for the command-line tool

pub mod net;
pub mod url;
pub mod warning;
