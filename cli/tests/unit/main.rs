//! Unit tests for the devpod CLI
//!
//! These tests use mocked dependencies and run fast without spawning a
//! container runtime.

mod descriptor_loader;
mod helpers;
