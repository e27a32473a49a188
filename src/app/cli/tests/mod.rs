//! Tests for the CLI module

mod display_tests;
