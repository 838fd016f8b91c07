//! File I/O for mesh assets.
//!
//! This module provides readers for the two asset formats the scene uses:
//! OBJ (buildings) and PLY (spider).

pub mod obj;
pub mod ply;

pub use obj::{read_obj, write_obj};
pub use ply::read_ply;
