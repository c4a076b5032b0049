//! Infrastructure Layer
//!
//! Storage implementations and the backend HTTP integration.

pub mod cookie_jar;
pub mod file;
pub mod http;
pub mod memory;

pub use cookie_jar::StorageCookieJar;
pub use file::FileStorage;
pub use http::HttpAuthApi;
pub use memory::MemoryStorage;
