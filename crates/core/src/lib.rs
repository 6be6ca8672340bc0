#![forbid(unsafe_code)]

pub mod model;
pub mod rng;
pub mod time;

pub use time::Clock;
