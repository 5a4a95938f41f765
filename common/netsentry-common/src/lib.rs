//! netsentry common - backend client shared by the dashboard
//!
//! - **Types**: request bodies and response envelopes for every endpoint
//! - **Backend**: the [`Backend`] trait and its reqwest implementation
//! - **Errors**: [`ApiError`], separating transport failures from rejections
//! - **Init**: tracing setup with text or JSON output
//!
//! # Example
//!
//! ```rust,ignore
//! use netsentry_common::{Backend, Endpoints, HttpBackend};
//!
//! let backend = HttpBackend::new("http://127.0.0.1:5000", Endpoints::default(), timeout)?;
//! for name in backend.interfaces().await? {
//!     println!("{}", name);
//! }
//! ```

pub mod backend;
pub mod error;
pub mod init;
pub mod types;

// Re-export commonly used items at crate root
pub use backend::{Backend, Endpoints, HttpBackend};
pub use error::{ApiError, ApiResult};
pub use init::{init_tracing, level_for_verbosity};
pub use types::{AlertRecord, ErrorPacketRecord, PacketRecord, TrafficRate};

// Re-export async_trait for implementing Backend
pub use async_trait::async_trait;
