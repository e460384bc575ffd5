//! Report generation for catalog analytics.

pub mod generator;

pub use generator::*;
