//! Socratis observability: `tracing` subscriber setup and log capture.
//!
//! Logs go to stderr (console mode) or to an in-memory sink that the terminal
//! UI shows on its debug screen, since stderr output would corrupt the
//! alternate screen.
//!
//! ```no_run
//! use socratis_observability::{LogBuffer, ObservabilityConfig, init};
//!
//! let buffer = LogBuffer::new(500);
//! let config = ObservabilityConfig::new("socratis")
//!     .with_console(false)
//!     .with_log_sink(buffer.sink());
//! init(config)?;
//! tracing::info!("ready");
//! # Ok::<(), socratis_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `SOCRATIS_LOG` or `RUST_LOG` - log level filter

pub mod config;
pub mod error;
pub mod log_buffer;
pub mod telemetry;
pub mod tracing;
pub mod tui_log_layer;

pub use config::{LogSink, ObservabilityConfig};
pub use error::ObservabilityError;
pub use log_buffer::LogBuffer;
pub use telemetry::{init, init_from_env};
pub use tracing::{record_duration, record_error};
