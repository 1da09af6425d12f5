pub mod archiver;
pub mod client;
pub mod constants;
pub mod description;
pub mod index;
