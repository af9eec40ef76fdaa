pub mod article;
pub mod content;
pub mod navigation;
pub mod notification;
pub mod stats;
pub mod wire;

pub use article::*;
pub use content::*;
pub use navigation::*;
pub use notification::*;
pub use stats::*;
