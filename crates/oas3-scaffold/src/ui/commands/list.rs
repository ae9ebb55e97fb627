use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use crate::{
  contract::Contract,
  generator::CodegenConfig,
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

/// One listed operation: id, method, url, feature and success status (`-` when missing).
type OperationRow = (String, String, String, String, String);

fn operation_rows(contract: &Contract) -> Vec<OperationRow> {
  let config = CodegenConfig::builder().build();

  contract
    .operations
    .iter()
    .map(|operation| {
      let status = operation
        .success_response()
        .map_or_else(|| "-".to_string(), |(code, _)| code.to_string());
      (
        operation.operation_id.clone(),
        operation.method.as_str().to_string(),
        operation.url.clone(),
        config.feature_of(operation),
        status,
      )
    })
    .sorted_by(|a, b| a.0.cmp(&b.0))
    .collect()
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let contract = SpecLoader::open(input).await?.parse()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["OPERATION ID", "METHOD", "PATH", "FEATURE", "SUCCESS"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for (operation_id, method, path, feature, status) in operation_rows(&contract) {
    let status_color = if status == "-" { colors.accent() } else { colors.success() };

    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(feature).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(status).fg(IntoComfyColor::into(status_color)));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
