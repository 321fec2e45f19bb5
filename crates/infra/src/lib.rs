//! `inmokit-infra` — infrastructure implementations of the core's contracts.

pub mod memory;

pub use memory::MemoryDirectory;
