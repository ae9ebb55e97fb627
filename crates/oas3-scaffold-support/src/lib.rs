//! Runtime support for code scaffolded by `oas3-scaffold`.
//!
//! Generated request, response, model and factory types link against this crate for the
//! deferred-value sentinel, presence tracking for input models, the listing parameters shared
//! by collection endpoints and the marker traits implemented by requests and responses.

mod deferred;
mod listing;
mod presence;

pub use deferred::{Deferred, deferred, deferred_or};
pub use listing::{ListingParams, ListingParamsError, SortDirection, SortField};
pub use presence::{PresenceTracked, deserialize_tracked, from_value_tracked, supplied_keys};
pub use serde_json::Value;

/// Implemented by every generated request type.
pub trait ServerRequest {}

/// Implemented by every generated response type.
pub trait ServerResponse {
  /// Whether the payload is wrapped in a `{"data": ...}` envelope when serialized.
  fn is_wrap_data(&self) -> bool;
}

/// Applies listing parameters to an in-memory slice of entities.
///
/// Generated factories take an implementation of this trait so their `list` stubs have a
/// paging collaborator ready to use.
pub trait EntityListingService {
  fn list<T: Clone>(&self, items: &[T], params: &ListingParams) -> Vec<T>;
}

/// Pages a slice using `limit` and 1-based `page`, ignoring filters and sort order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagingListingService;

impl EntityListingService for PagingListingService {
  fn list<T: Clone>(&self, items: &[T], params: &ListingParams) -> Vec<T> {
    let offset = params.offset();
    let window = items.iter().skip(offset);
    match params.limit {
      Some(limit) => window.take(limit).cloned().collect(),
      None => window.cloned().collect(),
    }
  }
}
