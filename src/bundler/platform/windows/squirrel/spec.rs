//! NuGet descriptor generation.
//!
//! Renders the `.nuspec` for the staged application from [`NUSPEC_TEMPLATE`]
//! and the resolved options.

use super::template::NUSPEC_TEMPLATE;
use crate::bundler::{
    builder::StagingDir,
    error::{Error, ErrorExt, Result},
    settings::Options,
    utils::template::{Escape, render},
};
use std::path::PathBuf;

/// Renders the descriptor text for `options`.
///
/// Rendering is deterministic: the same options always give the same text.
pub fn render_spec(options: &Options) -> Result<String> {
    let data = options.to_template_data()?;
    render(NUSPEC_TEMPLATE, &data, Escape::Markup)
}

/// Writes `nuget/<name>.nuspec` into the staging tree.
///
/// # Errors
///
/// [`Error::Content`] with operation `creating spec file`.
pub async fn create_spec(options: &Options, staging: &StagingDir) -> Result<PathBuf> {
    let spec_path = staging.spec_path();
    options.log(&format!("Creating spec file at {}", spec_path.display()));

    write_spec(options, &spec_path)
        .await
        .map_err(|e| Error::Content {
            operation: "creating spec file",
            source: Box::new(e),
        })?;

    Ok(spec_path)
}

async fn write_spec(options: &Options, spec_path: &std::path::Path) -> Result<()> {
    let contents = render_spec(options)?;
    options.log(&format!("Generated spec file\n{}", contents));

    if let Some(parent) = spec_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    tokio::fs::write(spec_path, contents)
        .await
        .fs_context("writing spec file", spec_path)
}
