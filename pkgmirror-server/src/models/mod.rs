mod package;

pub use package::*;
