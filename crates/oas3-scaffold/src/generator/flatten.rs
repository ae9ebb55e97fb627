use crate::contract::Schema;

/// Merges every `allOf` fragment into its parent and flattens `properties` and `items` recursively.
///
/// Fields the node declares win over the fragment's. `properties` and `extensions` merge key-wise
/// with the node's entries first and fragment-only keys appended. `required` is unioned. The result
/// has an empty `all_of` at every level.
#[must_use]
pub fn flatten(schema: &Schema) -> Schema {
  let mut node = schema.clone();
  let fragments = std::mem::take(&mut node.all_of);

  for fragment in &fragments {
    merge_fragment(&mut node, flatten(fragment));
  }

  node.properties = node
    .properties
    .iter()
    .map(|(name, property)| (name.clone(), flatten(property)))
    .collect();
  node.items = node.items.as_deref().map(|items| Box::new(flatten(items)));

  node
}

fn merge_fragment(node: &mut Schema, fragment: Schema) {
  for (name, property) in fragment.properties {
    node.properties.entry(name).or_insert(property);
  }
  node.required.extend(fragment.required);
  node.extensions = node.extensions.merged_over(&fragment.extensions);

  if node.enum_values.is_empty() {
    node.enum_values = fragment.enum_values;
  }
  node.schema_type = node.schema_type.or(fragment.schema_type);
  node.nullable = node.nullable.or(fragment.nullable);
  node.default = node.default.take().or(fragment.default);
  node.example = node.example.take().or(fragment.example);
  node.items = node.items.take().or(fragment.items);
}
