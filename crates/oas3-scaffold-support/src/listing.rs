use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query parameter names reserved for listing endpoints.
pub const LISTING_PARAM_NAMES: [&str; 4] = ["filter", "sort", "limit", "page"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListingParamsError {
  #[error("invalid value '{value}' for listing parameter '{name}'")]
  InvalidNumber { name: String, value: String },
  #[error("listing parameter 'page' must be at least 1")]
  PageOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  Asc,
  Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
  pub field: String,
  pub direction: SortDirection,
}

/// Filtering, sorting and paging requested by a collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
  #[serde(default)]
  pub filter: BTreeMap<String, String>,
  #[serde(default)]
  pub sort: Vec<SortField>,
  pub limit: Option<usize>,
  pub page: Option<usize>,
}

impl ListingParams {
  /// Builds listing parameters from decoded query pairs.
  ///
  /// Accepts `filter[field]=value`, `sort=name,-created_at`, `limit=N` and `page=N`
  /// (1-based). Unrelated pairs are ignored.
  pub fn from_query_pairs<'a, I>(pairs: I) -> Result<Self, ListingParamsError>
  where
    I: IntoIterator<Item = (&'a str, &'a str)>,
  {
    let mut params = Self::default();

    for (key, value) in pairs {
      if let Some(field) = key.strip_prefix("filter[").and_then(|rest| rest.strip_suffix(']')) {
        params.filter.insert(field.to_string(), value.to_string());
        continue;
      }

      match key {
        "sort" => params.sort = parse_sort(value),
        "limit" => params.limit = Some(parse_number(key, value)?),
        "page" => {
          let page = parse_number(key, value)?;
          if page == 0 {
            return Err(ListingParamsError::PageOutOfRange);
          }
          params.page = Some(page);
        }
        _ => {}
      }
    }

    Ok(params)
  }

  /// Number of entities skipped before the requested page.
  #[must_use]
  pub fn offset(&self) -> usize {
    match (self.page, self.limit) {
      (Some(page), Some(limit)) => page.saturating_sub(1).saturating_mul(limit),
      _ => 0,
    }
  }

  #[must_use]
  pub fn is_reserved(name: &str) -> bool {
    LISTING_PARAM_NAMES.contains(&name)
  }
}

fn parse_number(name: &str, value: &str) -> Result<usize, ListingParamsError> {
  value.parse().map_err(|_| ListingParamsError::InvalidNumber {
    name: name.to_string(),
    value: value.to_string(),
  })
}

fn parse_sort(value: &str) -> Vec<SortField> {
  value
    .split(',')
    .map(str::trim)
    .filter(|field| !field.is_empty())
    .map(|field| match field.strip_prefix('-') {
      Some(name) => SortField {
        field: name.to_string(),
        direction: SortDirection::Desc,
      },
      None => SortField {
        field: field.to_string(),
        direction: SortDirection::Asc,
      },
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_query_pairs_parses_all_parameters() {
    let params = ListingParams::from_query_pairs([
      ("filter[status]", "active"),
      ("sort", "name,-created_at"),
      ("limit", "25"),
      ("page", "3"),
      ("category", "tools"),
    ])
    .expect("valid listing params");

    assert_eq!(params.filter.get("status").map(String::as_str), Some("active"));
    assert_eq!(params.sort.len(), 2);
    assert_eq!(params.sort[0].direction, SortDirection::Asc);
    assert_eq!(params.sort[1].field, "created_at");
    assert_eq!(params.sort[1].direction, SortDirection::Desc);
    assert_eq!(params.limit, Some(25));
    assert_eq!(params.page, Some(3));
    assert_eq!(params.offset(), 50);
  }

  #[test]
  fn test_from_query_pairs_rejects_invalid_numbers() {
    let err = ListingParams::from_query_pairs([("limit", "ten")]).unwrap_err();
    assert_eq!(
      err,
      ListingParamsError::InvalidNumber {
        name: "limit".to_string(),
        value: "ten".to_string(),
      }
    );
  }

  #[test]
  fn test_from_query_pairs_rejects_page_zero() {
    let err = ListingParams::from_query_pairs([("page", "0")]).unwrap_err();
    assert_eq!(err, ListingParamsError::PageOutOfRange);
  }

  #[test]
  fn test_reserved_names() {
    assert!(ListingParams::is_reserved("sort"));
    assert!(!ListingParams::is_reserved("category"));
  }
}
