//! Command tests for autobackup
//!
//! These tests verify a full backup run using mocked dependencies.

mod report;
