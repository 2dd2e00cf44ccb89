//! Unit tests that span several modules
//!
//! This module contains tests for the optional global dispatcher, config
//! driven construction and logging setup.
