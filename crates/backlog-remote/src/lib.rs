pub mod http_client;
pub mod traits;

pub use http_client::HttpBacklogApi;
pub use traits::BacklogApi;

#[cfg(feature = "mock")]
pub use traits::MockBacklogApi;
