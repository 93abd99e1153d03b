//! MSBuild XML rendering for [`ContentProject`].

use std::fmt::Write;

use super::ContentProject;

const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

pub(super) fn render(project: &ContentProject) -> String {
  let mut out = String::new();

  // Writing into a String cannot fail.
  let _ = write_project(&mut out, project);
  out
}

fn write_project(out: &mut String, project: &ContentProject) -> std::fmt::Result {
  writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
  writeln!(
    out,
    r#"<Project ToolsVersion="4.0" DefaultTargets="Build" xmlns="{}">"#,
    MSBUILD_NAMESPACE
  )?;

  writeln!(out, "  <PropertyGroup>")?;
  for (name, value) in &project.properties {
    writeln!(out, "    <{name}>{}</{name}>", escape(value))?;
  }
  writeln!(out, "  </PropertyGroup>")?;

  if !project.references.is_empty() {
    writeln!(out, "  <ItemGroup>")?;
    for reference in &project.references {
      writeln!(out, r#"    <Reference Include="{}" />"#, escape(reference))?;
    }
    writeln!(out, "  </ItemGroup>")?;
  }

  if !project.items.is_empty() {
    writeln!(out, "  <ItemGroup>")?;
    for item in &project.items {
      writeln!(
        out,
        r#"    <Compile Include="{}">"#,
        escape(&item.include.to_string_lossy())
      )?;
      writeln!(out, "      <Link>{}</Link>", escape(&item.link))?;
      writeln!(out, "      <Name>{}</Name>", escape(&item.name))?;
      if let Some(importer) = &item.importer {
        writeln!(out, "      <Importer>{}</Importer>", escape(importer))?;
      }
      if let Some(processor) = &item.processor {
        writeln!(out, "      <Processor>{}</Processor>", escape(processor))?;
      }
      writeln!(out, "    </Compile>")?;
    }
    writeln!(out, "  </ItemGroup>")?;
  }

  for import in &project.imports {
    writeln!(out, r#"  <Import Project="{}" />"#, escape(import))?;
  }

  writeln!(out, "</Project>")
}

fn escape(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&apos;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
