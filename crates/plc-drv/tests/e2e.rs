//! End-to-end CLI tests, driving the compiled `plc` binary directly.

#[path = "e2e/cli_tests.rs"]
mod cli_tests;
