// Adapters layer: concrete implementations of the platform ports.

pub mod http;
pub mod local;

pub use http::HttpPlatform;
pub use local::LocalStorage;
