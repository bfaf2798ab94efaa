//! Page arithmetic and pagination envelope primitives.
//!
//! Listing views in Power Hub fetch their whole collection up front and page
//! through it in memory. This crate owns the arithmetic for that: how many
//! pages a collection spans, which slice belongs to a page, and how
//! "previous"/"next" navigation saturates at the ends. It also provides a
//! serialisable [`Page`] envelope with optional navigation links so HTTP
//! adapters can return a consistent shape.
//!
//! # Example
//!
//! ```
//! use pagination::{PageNumber, PageSize, Paginator};
//!
//! let listings: Vec<u32> = (1..=25).collect();
//! let paginator = Paginator::new(listings.len(), PageSize::DEFAULT);
//!
//! assert_eq!(paginator.total_pages(), 3);
//! let last = paginator.clamp(99);
//! assert_eq!(last.get(), 3);
//! assert_eq!(paginator.slice(&listings, last), &[21, 22, 23, 24, 25]);
//! assert_eq!(paginator.next(last), last);
//! assert_eq!(paginator.previous(PageNumber::FIRST), PageNumber::FIRST);
//! ```

mod envelope;
mod error;
mod paginator;

pub use envelope::{Page, PageLinks};
pub use error::PaginationError;
pub use paginator::{PageNumber, PageSize, Paginator};
