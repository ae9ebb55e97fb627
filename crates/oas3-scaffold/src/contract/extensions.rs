use serde_json::{Map, Value};

pub(crate) const FEATURE_KEY: &str = "x-feature";
pub(crate) const TYPE_OVERRIDE_KEY: &str = "x-type";
pub(crate) const FREE_FORM_KEY: &str = "x-json-params";
pub(crate) const LIST_PARAMS_KEY: &str = "x-list-params";
pub(crate) const WRAP_DATA_KEY: &str = "x-wrap-data";

/// The `x-` extension keys understood by the generator.
///
/// Unrecognized extension keys are ignored. Each field stays `None` when the key is absent so
/// that composition merging can tell "unset" from an explicit `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
  pub feature: Option<String>,
  pub type_override: Option<String>,
  pub free_form: Option<bool>,
  pub list_params: Option<bool>,
  pub wrap_data: Option<bool>,
}

impl Extensions {
  pub(crate) fn from_object(object: &Map<String, Value>) -> Self {
    let string = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);
    let flag = |key: &str| object.get(key).and_then(Value::as_bool);

    Self {
      feature: string(FEATURE_KEY),
      type_override: string(TYPE_OVERRIDE_KEY),
      free_form: flag(FREE_FORM_KEY),
      list_params: flag(LIST_PARAMS_KEY),
      wrap_data: flag(WRAP_DATA_KEY),
    }
  }

  /// Key-wise merge where `self` wins over `fallback`.
  #[must_use]
  pub fn merged_over(&self, fallback: &Self) -> Self {
    Self {
      feature: self.feature.clone().or_else(|| fallback.feature.clone()),
      type_override: self.type_override.clone().or_else(|| fallback.type_override.clone()),
      free_form: self.free_form.or(fallback.free_form),
      list_params: self.list_params.or(fallback.list_params),
      wrap_data: self.wrap_data.or(fallback.wrap_data),
    }
  }

  pub fn is_free_form(&self) -> bool {
    self.free_form.unwrap_or(false)
  }

  pub fn is_list_params(&self) -> bool {
    self.list_params.unwrap_or(false)
  }

  pub fn wraps_data(&self) -> bool {
    self.wrap_data.unwrap_or(true)
  }
}
