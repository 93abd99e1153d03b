use predicates::prelude::*;

use super::common::{TestEnv, dir_names};

const WRITE_OUTPUT: &str = "mkdir -p bin/Content/Textures && touch bin/Content/Textures/orange.xnb";

#[test]
fn build_with_succeeding_engine() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/Textures/orange.png", "png");

  env
    .build_cmd("exit 0")
    .arg(&file)
    .assert()
    .success()
    .stdout(predicate::str::contains("Textures/orange"))
    .stdout(predicate::str::contains("Build complete"))
    .stdout(predicate::str::contains("Files built: 1"));
}

#[test]
fn build_writes_project_into_build_dir() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/Textures/orange.png", "png");
  let build_dir = env.path("out");

  env
    .build_cmd(WRITE_OUTPUT)
    .arg("--build-dir")
    .arg(&build_dir)
    .arg(&file)
    .assert()
    .success();

  let project = std::fs::read_to_string(build_dir.join("Content.contentproj")).unwrap();
  assert!(project.contains("<Name>Textures/orange</Name>"));
  assert!(project.contains("<Importer>TextureImporter</Importer>"));
  assert!(build_dir.join("bin/Content/Textures/orange.xnb").exists());
}

#[test]
fn build_dir_survives_dispose() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/Textures/orange.png", "png");
  let build_dir = env.path("out");

  env
    .build_cmd(WRITE_OUTPUT)
    .arg("--dispose")
    .arg("--build-dir")
    .arg(&build_dir)
    .arg(&file)
    .assert()
    .success();

  assert!(build_dir.join("bin/Content/Textures/orange.xnb").exists());
}

#[test]
fn build_keeps_scratch_dir_by_default() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");

  env.build_cmd("exit 0").arg(&file).assert().success();

  assert_eq!(dir_names(&env.scratch_path()).len(), 1);
}

#[test]
fn build_dispose_removes_scratch_dir() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");

  env
    .build_cmd("exit 0")
    .arg("--dispose")
    .arg(&file)
    .assert()
    .success();

  assert!(!env.scratch_path().exists());
}

#[test]
fn build_failure_reports_engine_errors() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");

  env
    .build_cmd("echo 'orange.png : error XNA2001: bad header'; exit 1")
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains("bad header"))
    .stderr(predicate::str::contains("Build failed"));
}

#[test]
fn build_json_output_is_valid() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/Textures/orange.png", "png");

  let output = env
    .build_cmd("exit 0")
    .args(["-o", "json"])
    .arg(&file)
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["success"], true);
  assert_eq!(report["files"][0]["content_name"], "Textures/orange");
  assert_eq!(report["files"][0]["processor"], "TextureProcessor");
  assert!(report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn build_keep_extensions() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");
  let build_dir = env.path("out");

  env
    .build_cmd("exit 0")
    .arg("--keep-extensions")
    .arg("--build-dir")
    .arg(&build_dir)
    .arg(&file)
    .assert()
    .success();

  let project = std::fs::read_to_string(build_dir.join("Content.contentproj")).unwrap();
  assert!(project.contains("<Name>orange.png</Name>"));
}

#[test]
fn build_passes_settings_and_references() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");
  let build_dir = env.path("out");

  env
    .build_cmd("exit 0")
    .args(["--platform", "xbox360", "--profile", "hidef"])
    .args(["-r", "My.Pipeline, Version=1.0.0.0"])
    .arg("--build-dir")
    .arg(&build_dir)
    .arg(&file)
    .assert()
    .success();

  let project = std::fs::read_to_string(build_dir.join("Content.contentproj")).unwrap();
  assert!(project.contains("<XnaPlatform>Xbox 360</XnaPlatform>"));
  assert!(project.contains("<XnaProfile>HiDef</XnaProfile>"));
  assert!(project.contains(r#"<Reference Include="My.Pipeline, Version=1.0.0.0" />"#));
}

#[test]
fn build_skips_unmapped_files() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/notes.txt", "hello");

  env
    .build_cmd("exit 0")
    .arg(&file)
    .assert()
    .success()
    .stderr(predicate::str::contains("skipping"));
}

#[test]
fn build_fails_on_unmapped_when_requested() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/notes.txt", "hello");

  env
    .build_cmd("exit 0")
    .arg("--fail-on-unmapped")
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains("no type mapping"));
}

#[test]
fn build_user_mapping_covers_custom_extension() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/Levels/castle.lvl", "level");
  let build_dir = env.path("out");

  env
    .build_cmd("exit 0")
    .args(["-m", r".*\.lvl=LevelImporter:LevelProcessor"])
    .arg("--build-dir")
    .arg(&build_dir)
    .arg(&file)
    .assert()
    .success();

  let project = std::fs::read_to_string(build_dir.join("Content.contentproj")).unwrap();
  assert!(project.contains("<Processor>LevelProcessor</Processor>"));
}

#[test]
fn build_missing_file_fails() {
  let env = TestEnv::with_content_project();

  env
    .build_cmd("exit 0")
    .arg(env.path("Content/missing.png"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("file not found"));
}

#[test]
fn build_without_content_project_fails() {
  let env = TestEnv::empty();
  let file = env.write_file("loose/orange.png", "png");

  env
    .build_cmd("exit 0")
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains(".contentproj"));
}

#[test]
fn build_with_content_root() {
  let env = TestEnv::empty();
  let file = env.write_file("Assets/Textures/orange.png", "png");

  env
    .build_cmd("exit 0")
    .arg("--content-root")
    .arg(env.path("Assets"))
    .arg(&file)
    .assert()
    .success()
    .stdout(predicate::str::contains("Textures/orange"));
}

#[test]
fn build_with_missing_engine_fails() {
  let env = TestEnv::with_content_project();
  let file = env.write_file("Content/orange.png", "png");

  env
    .xnac_cmd()
    .args(["build", "--engine", "/nonexistent/engine"])
    .arg(&file)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to start build engine"));
}
