pub mod error;
pub mod grammar;
pub mod resolver;
pub mod review;
