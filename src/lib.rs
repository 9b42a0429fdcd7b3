//! Diagnostic HTTP request catcher.
//!
//! Accepts any request on the root path, pretty-prints what was received on
//! the console, appends it as a JSON line to a per-run log file, and echoes
//! it back as the JSON response.

pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod present;
pub mod record;
pub mod sink;
pub mod state;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use record::RequestRecord;
pub use sink::LogSink;
pub use state::ServerState;
