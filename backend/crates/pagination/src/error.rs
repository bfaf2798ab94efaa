//! Errors raised when constructing pagination primitives.

use thiserror::Error;

/// Validation failures for page sizes and page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page sizes must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Page numbers are one-based.
    #[error("page numbers start at 1")]
    ZeroPageNumber,
}
