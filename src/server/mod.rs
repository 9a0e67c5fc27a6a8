// Server module entry point
// Listener setup, connection handling, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword and cannot be a module name, so map the file
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::{start_signal_handler, SignalHandler};
