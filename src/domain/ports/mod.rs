pub mod notification_api;
pub mod task_spawner;
pub mod time_saver_api;

pub use notification_api::NotificationApi;
pub use task_spawner::TaskSpawner;
pub use time_saver_api::TimeSaverApi;
