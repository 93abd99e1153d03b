use anyhow::Result;
use serde::Serialize;

use xnacontent_lib::default_mappings;

use crate::output::{OutputFormat, format_tools, print_json, symbols};

#[derive(Debug, Serialize)]
struct MappingRow<'a> {
  pattern: &'a str,
  importer: Option<&'a str>,
  processor: Option<&'a str>,
}

/// List the built-in mappings in resolution order.
pub fn cmd_mappings(output: OutputFormat) -> Result<()> {
  let rows: Vec<MappingRow<'_>> = default_mappings()
    .iter()
    .map(|m| MappingRow {
      pattern: m.pattern(),
      importer: m.importer(),
      processor: m.processor(),
    })
    .collect();

  if output.is_json() {
    return print_json(&rows);
  }

  let width = rows.iter().map(|r| r.pattern.len()).max().unwrap_or(0);
  for row in &rows {
    println!(
      "{:width$}  {} {}",
      row.pattern,
      symbols::ARROW,
      format_tools(row.importer, row.processor),
      width = width
    );
  }

  Ok(())
}
