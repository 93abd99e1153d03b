use predicates::prelude::*;

use super::common::{TestEnv, dir_names};

// Far above any real pid_max.
const DEAD_PID: &str = "4000000001";

#[test]
fn sweep_removes_dead_process_dirs() {
  let env = TestEnv::empty();
  env.write_file(&format!("scratch/{}/0/Content.contentproj", DEAD_PID), "<Project />");
  env.write_file("scratch/not-a-pid/keep.txt", "keep");

  env
    .xnac_cmd()
    .arg("sweep")
    .assert()
    .success()
    .stdout(predicate::str::contains("Directories removed: 1"));

  assert_eq!(dir_names(&env.scratch_path()), vec!["not-a-pid"]);
}

#[test]
fn sweep_dry_run_shows_what_would_be_removed() {
  let env = TestEnv::empty();
  env.write_file(&format!("scratch/{}/0/Content.contentproj", DEAD_PID), "<Project />");

  env
    .xnac_cmd()
    .arg("sweep")
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert_eq!(dir_names(&env.scratch_path()), vec![DEAD_PID]);
}

#[test]
fn sweep_json_output_is_valid() {
  let env = TestEnv::empty();

  env
    .xnac_cmd()
    .arg("sweep")
    .args(["-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("bytes_freed"))
    .stdout(predicate::str::contains("deleted_paths"));
}
