use std::path::PathBuf;

use crate::{
  emitter::LocationTable,
  generator::{
    GenerationError,
    ast::{Artifact, ArtifactKind, Namespace},
  },
};

fn artifact(namespace: &[&str], name: &str, kind: ArtifactKind) -> Artifact {
  Artifact::builder()
    .namespace(Namespace::new(namespace.iter().copied()))
    .name(name)
    .kind(kind)
    .build()
}

#[test]
fn test_file_path_strips_prefix_and_snake_cases() -> anyhow::Result<()> {
  let table = LocationTable::new(Namespace::parse("api"), "out");
  let model = artifact(&["api", "Items", "models"], "ItemModel", ArtifactKind::Model);

  assert_eq!(table.file_path(&model)?, PathBuf::from("out/items/models/item_model.rs"));
  Ok(())
}

#[test]
fn test_directory_override_applies_to_one_kind() -> anyhow::Result<()> {
  let table = LocationTable::new(Namespace::parse("api"), "src/api").with_directory(ArtifactKind::Fixture, "tests/api");
  let fixture = artifact(&["api", "Items", "fixtures"], "ListItemsFixture", ArtifactKind::Fixture);
  let request = artifact(&["api", "Items", "requests"], "ListItemsRequest", ArtifactKind::Request);

  assert_eq!(
    table.file_path(&fixture)?,
    PathBuf::from("tests/api/items/fixtures/list_items_fixture.rs")
  );
  assert_eq!(
    table.file_path(&request)?,
    PathBuf::from("src/api/items/requests/list_items_request.rs")
  );
  Ok(())
}

#[test]
fn test_namespace_outside_prefix_is_unresolvable() {
  let table = LocationTable::new(Namespace::parse("api"), "out");
  let stray = artifact(&["web", "Items", "models"], "ItemModel", ArtifactKind::Model);

  assert_eq!(
    table.file_path(&stray),
    Err(GenerationError::NamespaceUnresolvable {
      name: "web::Items::models".to_string()
    })
  );
}

#[test]
fn test_keyword_segments_get_suffix() -> anyhow::Result<()> {
  let table = LocationTable::new(Namespace::parse("api"), "out");
  let model = artifact(&["api", "Type", "models"], "TypeModel", ArtifactKind::Model);

  assert_eq!(table.file_path(&model)?, PathBuf::from("out/type_/models/type_model.rs"));
  Ok(())
}
