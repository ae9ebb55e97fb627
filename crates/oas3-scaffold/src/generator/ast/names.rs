use std::fmt;

/// Ordered namespace segments, e.g. `api::Items::models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(Vec<String>);

impl Namespace {
  pub fn new<I, S>(segments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self(
      segments
        .into_iter()
        .map(Into::into)
        .filter(|segment: &String| !segment.is_empty())
        .collect(),
    )
  }

  /// Parses a `::`-separated path.
  pub fn parse(path: &str) -> Self {
    Self::new(path.split("::"))
  }

  #[must_use]
  pub fn segments(&self) -> &[String] {
    &self.0
  }

  #[must_use]
  pub fn child(&self, segment: impl Into<String>) -> Self {
    let mut segments = self.0.clone();
    segments.push(segment.into());
    Self::new(segments)
  }

  /// Segments after `prefix`, or `None` when `self` is not under `prefix`.
  #[must_use]
  pub fn strip_prefix(&self, prefix: &Namespace) -> Option<&[String]> {
    self.0.strip_prefix(prefix.0.as_slice())
  }

  #[must_use]
  pub fn qualify(&self, name: impl Into<String>) -> QualifiedName {
    QualifiedName {
      namespace: self.clone(),
      name: name.into(),
    }
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.join("::"))
  }
}

/// Namespace plus simple name; the identity of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
  pub namespace: Namespace,
  pub name: String,
}

impl fmt::Display for QualifiedName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.namespace.segments().is_empty() {
      f.write_str(&self.name)
    } else {
      write!(f, "{}::{}", self.namespace, self.name)
    }
  }
}
