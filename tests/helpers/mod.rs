#![allow(dead_code)]

pub mod content_helpers;
pub mod fake_backend;

pub use content_helpers::*;
pub use fake_backend::*;
