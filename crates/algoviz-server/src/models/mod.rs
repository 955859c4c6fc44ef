//! Catalog models served by the API.

mod algorithm;

pub use algorithm::Algorithm;
