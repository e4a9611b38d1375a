pub mod common;
pub mod profile;
pub mod stats;
