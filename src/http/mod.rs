//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, path/method dispatch)
//!     → normalize (canonical record)
//!     → present (console block) + sink (JSON line) + JSON response
//! ```

pub mod cors;
pub mod server;

pub use server::HttpServer;
