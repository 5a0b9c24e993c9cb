//! The resolved options record threaded through every pipeline stage.

use super::{RenameFn, SharedLogger, SigningMethod};
use crate::bundler::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Complete, validated installer options.
///
/// Built by [`Overrides::finalize`](super::Overrides::finalize). Serializes to
/// camelCase JSON, which is the data model for the `.nuspec` template and for
/// rename templates. Optional fields serialize as `null` so templates can test
/// them with `{{#if}}`. Credentials are never serialized.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Package id; also the staged application directory name.
    pub name: String,
    pub product_name: Option<String>,
    pub description: String,
    pub product_description: String,
    /// Version as declared by the application.
    pub version: String,
    /// [`version`](Self::version) normalized for NuGet.
    pub nuget_version: String,
    pub copyright: Option<String>,
    pub authors: Vec<String>,
    pub owners: Vec<String>,
    pub homepage: Option<String>,
    /// Main executable file name inside the application directory.
    pub exe: String,
    /// Setup icon (`.ico`).
    pub icon: Option<PathBuf>,
    /// Loading animation shown by the setup executable (`.gif`).
    pub animation: Option<PathBuf>,
    pub icon_url: Option<String>,
    pub license_url: Option<String>,
    pub require_license_acceptance: bool,
    pub tags: Vec<String>,
    pub certificate_file: Option<PathBuf>,
    #[serde(skip)]
    pub certificate_password: Option<String>,
    #[serde(skip)]
    pub sign_with_params: Option<String>,
    /// Release feed consulted for delta packages.
    pub remote_releases: Option<String>,
    pub no_msi: bool,
    /// Application directory being packaged.
    pub src: PathBuf,
    /// Output directory for the final artifacts.
    pub dest: PathBuf,

    #[serde(skip)]
    pub signing: SigningMethod,
    #[serde(skip)]
    pub rename: RenameFn,
    #[serde(skip)]
    pub logger: SharedLogger,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("name", &self.name)
            .field("product_name", &self.product_name)
            .field("version", &self.version)
            .field("nuget_version", &self.nuget_version)
            .field("exe", &self.exe)
            .field("remote_releases", &self.remote_releases)
            .field("no_msi", &self.no_msi)
            .field("src", &self.src)
            .field("dest", &self.dest)
            .field("signed", &self.signing.is_signed())
            .finish_non_exhaustive()
    }
}

impl Options {
    /// Sends one message to the injected logger.
    pub fn log(&self, message: &str) {
        self.logger.log(message);
    }

    /// Template data model (camelCase JSON object).
    pub fn to_template_data(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty JSON dump used for diagnostics.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Base name of the staging subdirectory: `<name>_<version>`.
    pub fn staging_name(&self) -> String {
        format!("{}_{}", self.name, self.version)
    }

    /// File name of the rendered descriptor: `<name>.nuspec`.
    pub fn spec_file_name(&self) -> String {
        format!("{}.nuspec", self.name)
    }
}
