//! Command implementations.

pub mod indexes;
pub mod track;
