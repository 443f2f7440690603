#![warn(missing_docs)]

//! Named CSG solids and ray tracking for the raycell kernel.
//!
//! A [`Cell`] ties a parsed rule tree to the surfaces it references and the
//! material that fills it; [`Track`] is the transient result of tracing a
//! directed line through one cell. The typical lifecycle is
//! `set_definition` → `convert_complement` → `populate` → queries.

mod cell;
mod error;
mod intercept;
mod material;
mod track;

pub use cell::Cell;
pub use error::CellError;
pub use material::Material;
pub use track::{Link, Track};
