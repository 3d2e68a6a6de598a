//! Queries over a project's type index.
//!
//! [`QueryService`] answers the four structural questions a client asks about
//! a Java codebase: what a type looks like, which types or packages match a
//! fuzzy name, and what a type's supertypes and subtypes are. The index is
//! never owned here; each request resolves its project URI to an index handle
//! through the injected [`ProjectResolver`](typelens_index::ProjectResolver).
//!
//! Every operation is read-only and takes a cancellation token that is checked
//! between units of work. [`QueryService::execute`] and
//! [`QueryService::execute_async`] add a deadline on top, reporting an elapsed
//! deadline as [`QueryError::Timeout`] rather than as an empty result.

pub mod aggregate;
mod error;
mod hierarchy;
mod request;
mod search;
mod service;

pub use error::QueryError;
pub use request::{QueryRequest, QueryResponse};
pub use service::QueryService;
pub use typelens_scheduler::CancellationToken;
