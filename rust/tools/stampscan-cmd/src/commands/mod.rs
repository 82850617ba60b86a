//! Command implementations for stampscan-cmd

pub mod collect;
pub mod inspect;
