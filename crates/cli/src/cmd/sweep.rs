use std::time::Instant;

use anyhow::Result;

use xnacontent_lib::ScratchSpace;

use crate::output::{OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_success};

pub fn cmd_sweep(dry_run: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let scratch = ScratchSpace::default_space();
  let result = scratch.sweep(dry_run);

  if output.is_json() {
    print_json(&result)?;
  } else {
    println!();
    if dry_run {
      print_info("Dry run - no changes made");
    } else {
      print_success("Sweep complete!");
    }
    print_stat("Scratch root", &scratch.root().display().to_string());
    print_stat("Directories removed", &result.stats.deleted.to_string());
    print_stat("Directories in use", &result.stats.live.to_string());
    print_stat("Space freed", &format_bytes(result.stats.bytes_freed));
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}
