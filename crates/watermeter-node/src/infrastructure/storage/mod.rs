//! Storage infrastructure: flash filesystem back-ends.
//!
//! Both back-ends implement the
//! [`Filesystem`](crate::application::persist_config::Filesystem) port used
//! by the configuration store:
//!
//! - **`flash_dir`** – the device partition emulated on a host directory.
//! - **`memory`** – a shared in-memory volume with failure switches, always
//!   compiled so tests on any host can use it.

pub mod flash_dir;
pub mod memory;

pub use flash_dir::FlashDir;
pub use memory::MemoryFilesystem;
