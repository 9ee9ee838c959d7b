pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised by the piece catalog's geometry operations.
///
/// Both variants indicate a corrupted or misconfigured piece catalog and are
/// programmer errors, not expected gameplay outcomes. Routine failures such
/// as a blocked move or a rejected rotation are reported through `bool`
/// returns instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    /// A shape bitmap that is not square was asked to rotate.
    #[display("piece shape bitmap must be square")]
    InvalidGeometry,
    /// Kick offsets were requested for a shape size other than 3 or 4.
    #[display("no kick offsets defined for shape size {size}")]
    UnsupportedKickSize {
        #[error(not(source))]
        size: usize,
    },
}
