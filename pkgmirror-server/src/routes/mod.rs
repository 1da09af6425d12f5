pub mod basic;
pub mod package;
