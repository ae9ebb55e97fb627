use serde::{Serialize, Serializer, ser::Error as _};

/// The value of an optional input property that may not have been supplied at all.
///
/// `Undefined` means the property was absent from the payload. `Defined(None)` means the
/// client sent an explicit `null`. Partial-update handlers rely on telling the two apart.
///
/// `Undefined` has no wire form: serializing it is an error. Fields of this type carry
/// `#[serde(skip_serializing_if = "Deferred::is_undefined")]` so the key is left out instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deferred<T> {
  #[default]
  Undefined,
  Defined(T),
}

impl<T> Deferred<T> {
  #[must_use]
  pub const fn is_undefined(&self) -> bool {
    matches!(self, Self::Undefined)
  }

  #[must_use]
  pub const fn is_defined(&self) -> bool {
    matches!(self, Self::Defined(_))
  }

  pub fn as_ref(&self) -> Deferred<&T> {
    match self {
      Self::Undefined => Deferred::Undefined,
      Self::Defined(value) => Deferred::Defined(value),
    }
  }

  pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Deferred<U> {
    match self {
      Self::Undefined => Deferred::Undefined,
      Self::Defined(value) => Deferred::Defined(f(value)),
    }
  }

  /// Converts to `Option`, collapsing `Undefined` to `None`.
  pub fn defined(self) -> Option<T> {
    match self {
      Self::Undefined => None,
      Self::Defined(value) => Some(value),
    }
  }

  pub fn unwrap_or(self, fallback: T) -> T {
    match self {
      Self::Undefined => fallback,
      Self::Defined(value) => value,
    }
  }
}

impl<T: Serialize> Serialize for Deferred<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Undefined => Err(S::Error::custom("an undefined value has no serialized form, skip the field instead")),
      Self::Defined(value) => value.serialize(serializer),
    }
  }
}

fn is_present(presence: &[String], name: &str) -> bool {
  presence.iter().any(|supplied| supplied == name)
}

/// Reads a tracked property: `Undefined` unless `name` was recorded as supplied.
pub fn deferred<T: Clone>(presence: &[String], name: &str, value: &T) -> Deferred<T> {
  if is_present(presence, name) {
    Deferred::Defined(value.clone())
  } else {
    Deferred::Undefined
  }
}

/// Reads a tracked property that has a declared default: the default unless `name` was supplied.
pub fn deferred_or<T: Clone>(presence: &[String], name: &str, value: &T, default: T) -> T {
  if is_present(presence, name) {
    value.clone()
  } else {
    default
  }
}
