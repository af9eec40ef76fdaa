pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use config::*;
pub use domain::errors::{ClientError, ClientResult};
pub use models::*;
pub use services::*;
