//! Test utilities for the stampscan crates.
//!
//! - [`data_gen`]: seeded generation of stamp-ordered segments and ndjson
//!   record files
//! - [`reference`]: a brute-force collector used as the expected outcome of
//!   property checks

pub mod data_gen;
pub mod reference;
