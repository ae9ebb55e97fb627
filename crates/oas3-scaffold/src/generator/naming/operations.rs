use http::Method;

/// Derives an operation id for an operation that does not declare one.
///
/// Path template segments become `by_id`: `GET /items/{id}` -> `get_items_by_id`.
pub(crate) fn generate_operation_id(method: &Method, path: &str) -> String {
  let path_parts = path
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| {
      if s.starts_with('{') && s.ends_with('}') {
        "by_id"
      } else {
        s
      }
    })
    .collect::<Vec<_>>();

  if path_parts.is_empty() {
    method.as_str().to_lowercase()
  } else {
    format!("{}_{}", method.as_str(), path_parts.join("_")).to_lowercase()
  }
}
