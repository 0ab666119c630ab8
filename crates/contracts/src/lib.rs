//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: block
//! geometry, header residue sets, alignment outcomes and the configuration
//! blueprint. Business crates depend on this crate, never the reverse.
//!
//! ## Bit model
//! - Bit positions are counted from the first received bit (junk included)
//! - A slip moves the receiver's block boundary back by `data_width` bits

mod alignment;
mod blueprint;
mod error;
mod geometry;

pub use alignment::*;
pub use blueprint::*;
pub use error::*;
pub use geometry::*;
