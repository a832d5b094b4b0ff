//! Command execution abstraction for testability
//!
//! This module provides a trait-based abstraction for running the mirror
//! tool, enabling dependency injection and mocking for tests.

use super::mirror::{MirrorResult, Result};

/// Abstraction for running a program to completion with captured output
pub trait MirrorExecutor {
    /// Run `program` with `args`, blocking until it exits
    fn execute(&self, program: &str, args: &[&str]) -> Result<MirrorResult>;
}

/// Default implementation using real subprocess calls
#[derive(Debug, Clone, Default)]
pub struct RealExecutor;

impl RealExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl MirrorExecutor for RealExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> Result<MirrorResult> {
        super::command::run_captured(program, args)
    }
}

/// A mock executor for testing that records calls and returns queued responses
/// Available for use in external test crates
pub mod mock {
    use super::*;
    use crate::utils::mirror::MirrorError;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Recorded command invocation
    #[derive(Clone, Debug)]
    pub struct CommandCall {
        pub program: String,
        pub args: Vec<String>,
    }

    /// Response configuration for mock
    #[derive(Clone, Debug)]
    pub enum MockResponse {
        Exit {
            status: i32,
            stdout: String,
            stderr: String,
        },
        NotFound,
    }

    impl MockResponse {
        pub fn success(stdout: &str) -> Self {
            MockResponse::Exit {
                status: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }
        }

        pub fn failure(status: i32, stderr: &str) -> Self {
            MockResponse::Exit {
                status,
                stdout: String::new(),
                stderr: stderr.to_string(),
            }
        }
    }

    impl Default for MockResponse {
        fn default() -> Self {
            MockResponse::success("")
        }
    }

    /// Mock executor for testing
    ///
    /// Responses are consumed in call order; once the queue is empty the
    /// default response is returned.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        /// Recorded command invocations
        pub calls: Arc<Mutex<Vec<CommandCall>>>,
        responses: Arc<Mutex<VecDeque<MockResponse>>>,
        default_response: Arc<Mutex<MockResponse>>,
    }

    impl MockExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response for the next unanswered call
        pub fn push_response(self, response: MockResponse) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        /// Set the default response once the queue is drained
        pub fn with_default_response(self, response: MockResponse) -> Self {
            *self.default_response.lock().unwrap() = response;
            self
        }

        /// Get all recorded calls
        pub fn get_calls(&self) -> Vec<CommandCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn record_call(&self, program: &str, args: &[&str]) {
            self.calls.lock().unwrap().push(CommandCall {
                program: program.to_string(),
                args: args.iter().map(|s| s.to_string()).collect(),
            });
        }

        fn next_response(&self) -> MockResponse {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.default_response.lock().unwrap().clone())
        }
    }

    impl MirrorExecutor for MockExecutor {
        fn execute(&self, program: &str, args: &[&str]) -> Result<MirrorResult> {
            self.record_call(program, args);
            match self.next_response() {
                MockResponse::Exit {
                    status,
                    stdout,
                    stderr,
                } => Ok(MirrorResult {
                    status,
                    stdout,
                    stderr,
                }),
                MockResponse::NotFound => Err(MirrorError::ExecutableNotFound(program.to_string())),
            }
        }
    }
}
