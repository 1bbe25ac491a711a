pub mod client;
pub mod config;
pub mod error;
pub mod path;
pub mod url;
pub mod version;

pub use client::{ensure_success, ApiClient, HttpSession, TlsMode};
pub use config::{ApiFamily, SdkConfig};
pub use error::{Result, SdkError};
pub use path::normalize;
