use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::Error as _};
use serde_json::Value;

/// Implemented by generated input models, which keep the list of keys the client supplied.
pub trait PresenceTracked {
  /// Records which keys of `value` were present, recursing into nested input models.
  fn record_supplied(&mut self, value: &Value);
}

impl<T: PresenceTracked> PresenceTracked for Option<T> {
  fn record_supplied(&mut self, value: &Value) {
    if let Some(inner) = self {
      inner.record_supplied(value);
    }
  }
}

impl<T: PresenceTracked> PresenceTracked for Vec<T> {
  fn record_supplied(&mut self, value: &Value) {
    if let Value::Array(items) = value {
      for (item, item_value) in self.iter_mut().zip(items) {
        item.record_supplied(item_value);
      }
    }
  }
}

/// Keys of a JSON object in payload order; empty for anything else.
#[must_use]
pub fn supplied_keys(value: &Value) -> Vec<String> {
  match value {
    Value::Object(map) => map.keys().cloned().collect(),
    _ => vec![],
  }
}

/// Deserializes an input model from a JSON value and records which keys were present.
///
/// A key sent as `null` counts as supplied, so `deferred` reads it as `Defined(None)`.
pub fn from_value_tracked<T>(value: Value) -> serde_json::Result<T>
where
  T: DeserializeOwned + PresenceTracked,
{
  let mut target: T = serde_json::from_value(value.clone())?;
  target.record_supplied(&value);
  Ok(target)
}

/// `deserialize_with` adapter for fields holding an input model.
pub fn deserialize_tracked<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned + PresenceTracked,
{
  let value = Value::deserialize(deserializer)?;
  from_value_tracked(value).map_err(D::Error::custom)
}
