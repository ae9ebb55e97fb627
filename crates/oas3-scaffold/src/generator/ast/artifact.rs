use strum::{Display, EnumIter, EnumString};

use super::{Namespace, PropertyType, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ArtifactKind {
  Model,
  InputModel,
  Factory,
  Request,
  Query,
  Response,
  Fixture,
}

impl ArtifactKind {
  /// Scaffolds are written once and then owned by the user.
  #[must_use]
  pub fn is_scaffold(self) -> bool {
    matches!(self, Self::Factory | Self::Fixture)
  }

  #[must_use]
  pub fn annotation(self) -> Annotation {
    if self.is_scaffold() {
      Annotation::Scaffold
    } else {
      Annotation::Generated
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Annotation {
  #[default]
  Generated,
  Scaffold,
}

/// Support-crate trait implemented by an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BaseType {
  #[strum(serialize = "ServerRequest")]
  Request,
  #[strum(serialize = "ServerResponse")]
  Response,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
  #[default]
  Crate,
  Public,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GetterPolicy {
  #[default]
  None,
  /// Returns a reference to the stored value.
  Plain,
  /// Returns `Deferred::Undefined` unless the presence tracker lists the property.
  Deferred,
  /// Returns the declared default unless the presence tracker lists the property.
  DeferredWithDefault,
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct PropertyDef {
  /// Rust field name.
  #[builder(into)]
  pub name: String,
  /// Name on the wire, as declared in the contract.
  #[builder(into)]
  pub wire_name: String,
  pub ty: PropertyType,
  #[builder(default)]
  pub getter: GetterPolicy,
  #[builder(default)]
  pub setter: bool,
  #[builder(default)]
  pub visibility: Visibility,
}

impl PropertyDef {
  /// Fields with a default are initialized by the constructor instead of taken as arguments.
  #[must_use]
  pub fn is_constructor_arg(&self) -> bool {
    !self.ty.has_default()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodDef {
  /// Scaffolded `build` returning a fresh model.
  FactoryBuild { model: QualifiedName },
  /// Scaffolded `list` applying listing parameters.
  FactoryList { model: QualifiedName },
  WrapData(bool),
  /// Fixture row constructing `model`; `expression` is Rust source produced by the structure writer.
  FixtureRow { model: QualifiedName, expression: String },
}

/// A generatable unit of source code: one type plus its accessors and extra methods.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct Artifact {
  pub namespace: Namespace,
  #[builder(into)]
  pub name: String,
  pub kind: ArtifactKind,
  pub base: Option<BaseType>,
  #[builder(default)]
  pub properties: Vec<PropertyDef>,
  #[builder(default)]
  pub methods: Vec<MethodDef>,
  #[builder(default)]
  pub docs: Vec<String>,
  /// Field that records the wire names supplied by the client, on input models only.
  #[builder(into)]
  pub presence_tracker: Option<String>,
}

impl Artifact {
  #[must_use]
  pub fn qualified_name(&self) -> QualifiedName {
    self.namespace.qualify(&self.name)
  }

  #[must_use]
  pub fn annotation(&self) -> Annotation {
    self.kind.annotation()
  }

  #[must_use]
  pub fn property(&self, name: &str) -> Option<&PropertyDef> {
    self.properties.iter().find(|property| property.name == name)
  }

  pub fn property_names(&self) -> impl Iterator<Item = &str> {
    self.properties.iter().map(|property| property.name.as_str())
  }

  #[must_use]
  pub fn is_presence_tracker(&self, property: &PropertyDef) -> bool {
    self.presence_tracker.as_deref() == Some(property.name.as_str())
  }
}
