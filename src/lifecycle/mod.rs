//! Process lifecycle: startup ordering lives in `main.rs`; this module owns
//! the shutdown side.

pub mod shutdown;

pub use shutdown::Shutdown;
