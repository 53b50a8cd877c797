pub mod regression;

#[cfg(test)]
mod regression_tests;

pub use regression::*;
