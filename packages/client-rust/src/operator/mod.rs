//! Operators: the fetch engines behind every namespace call.
//!
//! A [`PagedRequest`] describes one endpoint: how to build the wire request
//! for a page position and how to decode the page that comes back. The
//! [`Operator`] runs it once; the [`PaginatedOperator`] walks the cursor
//! chain, either eagerly ([`PaginatedOperator::collect_all`]) or lazily
//! ([`PaginatedOperator::stream`]).

pub mod one_shot;
pub mod paginated;
pub mod request;
pub mod stream;

pub use one_shot::Operator;
pub use paginated::PaginatedOperator;
pub use request::{decode_body, decode_envelope, PagedRequest};
pub use stream::ResultStream;
