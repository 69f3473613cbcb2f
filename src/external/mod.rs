pub mod karma;

pub use karma::*;
