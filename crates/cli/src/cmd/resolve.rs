use anyhow::Result;
use serde::Serialize;

use xnacontent_lib::mapping::resolve;
use xnacontent_lib::{TypeMapping, default_mappings};

use crate::output::{OutputFormat, format_tools, print_json, print_stat, print_warning};

#[derive(Debug, Serialize)]
struct Resolution<'a> {
  file: &'a str,
  pattern: Option<&'a str>,
  importer: Option<&'a str>,
  processor: Option<&'a str>,
}

/// Print the mapping each file name resolves to.
pub fn cmd_resolve(files: &[String], mappings: &[TypeMapping], use_defaults: bool, output: OutputFormat) -> Result<()> {
  let resolutions: Vec<Resolution<'_>> = files
    .iter()
    .map(|file| {
      let mapping = resolve(file, mappings, default_mappings(), use_defaults);
      Resolution {
        file,
        pattern: mapping.map(TypeMapping::pattern),
        importer: mapping.and_then(TypeMapping::importer),
        processor: mapping.and_then(TypeMapping::processor),
      }
    })
    .collect();

  if output.is_json() {
    return print_json(&resolutions);
  }

  for resolution in &resolutions {
    let Some(pattern) = resolution.pattern else {
      print_warning(&format!("{}: no type mapping", resolution.file));
      continue;
    };
    println!("{}", resolution.file);
    print_stat("Pattern", pattern);
    print_stat("Tools", &format_tools(resolution.importer, resolution.processor));
  }

  Ok(())
}
