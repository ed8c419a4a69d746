//! Test utilities for bluecore-infrastructure integration tests
//!
//! Probe modules record their lifecycle calls into a shared [`Probe`] so the
//! tests can assert on ordering across the whole registry.

pub mod probes;

pub use probes::*;
