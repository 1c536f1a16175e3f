//! Rating record persistence.
//!
//! - `memory` keeps the record behind an async mutex for the life of the
//!   process.
//! - `toml_file` keeps it in `ratings.toml` under the platform data
//!   directory, so decisions survive app restarts.
//!
//! Both serialise their own read-modify-write cycles, so a single store
//! instance never loses an increment.

pub mod memory;
pub mod toml_file;

pub use memory::MemoryRatingStore;
pub use toml_file::TomlRatingStore;
