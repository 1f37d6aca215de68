//! OS integration module
//!
//! This module contains display enumeration and the construction of the
//! overlay surfaces and input blocker from the command line configuration.

pub mod displays;
pub mod system;

// Re-export main functions
pub use displays::*;
pub use system::*;
