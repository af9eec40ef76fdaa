pub mod client;

pub use client::{status_error, HttpBackend};
