pub mod content_service;
pub mod link_resolver;
pub mod notification_session;
pub mod notification_store;
pub mod placeholder;
pub mod timeout;

pub use content_service::*;
pub use link_resolver::*;
pub use notification_session::*;
pub use notification_store::*;
pub use timeout::*;
