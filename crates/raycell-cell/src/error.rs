//! Error types for cell construction and ray queries.

use raycell_algebra::AlgebraError;
use raycell_surface::SurfaceError;
use thiserror::Error;

/// Errors that can occur while building or querying a cell.
#[derive(Error, Debug)]
pub enum CellError {
    /// The cell-algebra expression failed to parse or resolve.
    #[error("cell algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    /// A surface definition failed to parse or construct.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// The cell has no definition yet.
    #[error("cell {0} has no definition")]
    NoDefinition(i32),

    /// A query was issued before `populate` succeeded.
    #[error("cell {0} is not populated")]
    Unpopulated(i32),

    /// The ray direction has zero length.
    #[error("ray direction has zero length")]
    ZeroDirection,

    /// The ray origin or direction contains a non-finite component.
    #[error("ray origin or direction is not finite")]
    NotFinite,

    /// A `#<cell>` reference cites a cell that does not exist.
    #[error("unresolved cell reference: #{0}")]
    UnresolvedCell(i32),

    /// `#<cell>` references form a cycle.
    #[error("circular cell reference involving #{0}")]
    CircularReference(i32),
}
