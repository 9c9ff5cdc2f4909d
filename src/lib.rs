pub mod config;
pub mod demo;
pub mod requests;
pub mod utils;
