//! Cross-cutting runtime support

pub mod shutdown;

pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
