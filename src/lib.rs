#![forbid(unsafe_code)]

#[macro_use]
pub mod prelude;

pub mod campus;
pub mod repo;
pub mod repr;
pub mod traits;
