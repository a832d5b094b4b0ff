//! Unit tests for autobackup
//!
//! These tests exercise individual components through the public API.

mod config;
mod mirror;
