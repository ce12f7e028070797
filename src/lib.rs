//! Langstrip - keep one audio language across a directory of containers
//!
//! This library crate exposes the configuration and reporting layers for
//! integration testing.

pub mod config;
pub mod report;
