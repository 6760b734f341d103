//! Shared setup for the runnable examples.

pub mod common;
