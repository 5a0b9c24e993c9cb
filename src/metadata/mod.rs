//! Application metadata discovery from the bundled `package.json`.
//!
//! An Electron app directory carries its manifest either inside the packed
//! `resources/app.asar` archive or loose at `resources/app/package.json`. The
//! archive wins when present.

pub mod asar;

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    platform::windows::squirrel::Toolset,
    settings::{Logger, Overrides},
};
use regex::Regex;
use serde::Deserialize;
use std::{path::Path, sync::LazyLock};

/// Fields of `package.json` the installer cares about.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    pub name: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub product_description: Option<String>,
    pub version: Option<String>,
    pub copyright: Option<String>,
    pub homepage: Option<String>,
    pub author: Option<Author>,
}

/// The `author` field: either `"Name <email> (url)"` or an object.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Person {
        name: Option<String>,
        email: Option<String>,
        url: Option<String>,
    },
}

static AUTHOR_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(<[^>]+>|\([^)]+\))").expect("valid regex"));

static AUTHOR_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("valid regex"));

impl Author {
    /// Display name with `<email>` and `(url)` segments removed.
    pub fn name(&self) -> Option<String> {
        match self {
            Author::Text(text) => {
                let name = AUTHOR_DECORATION.replace_all(text, "").trim().to_string();
                (!name.is_empty()).then_some(name)
            }
            Author::Person { name, .. } => name.clone().filter(|n| !n.is_empty()),
        }
    }

    /// Homepage taken from the `(url)` segment or the `url` property.
    pub fn url(&self) -> Option<String> {
        match self {
            Author::Text(text) => AUTHOR_URL
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
            Author::Person { url, .. } => url.clone(),
        }
    }
}

/// Reads `package.json` from the application directory `src`.
///
/// The packed `resources/app.asar` is tried first. Any failure there falls
/// back to the loose `resources/app/package.json`.
///
/// # Errors
///
/// [`Error::Metadata`] when neither the archive nor the loose manifest can be
/// read and parsed.
pub async fn read_package_json(src: &Path, logger: &dyn Logger) -> Result<PackageJson> {
    let with_asar = src.join("resources").join("app.asar");
    let without_asar = src.join("resources").join("app").join("package.json");

    let mut asar_error = None;
    if tokio::fs::try_exists(&with_asar).await.unwrap_or(false) {
        logger.log(&format!("Reading package metadata from {}", with_asar.display()));
        match asar::extract_file(&with_asar, "package.json")
            .await
            .and_then(parse_manifest)
        {
            Ok(pkg) => return Ok(pkg),
            Err(e) => {
                logger.log(&format!("Could not use {}: {}", with_asar.display(), e));
                asar_error = Some(e);
            }
        }
    }

    logger.log(&format!("Reading package metadata from {}", without_asar.display()));
    tokio::fs::read(&without_asar)
        .await
        .fs_context("reading", without_asar.clone())
        .and_then(parse_manifest)
        .map_err(|e| {
            let reason = match &asar_error {
                Some(asar) => format!("{}; {}", asar, e),
                None => e.to_string(),
            };
            Error::Metadata {
                reason,
                source: Some(Box::new(e)),
            }
        })
}

fn parse_manifest(bytes: Vec<u8>) -> Result<PackageJson> {
    Ok(serde_json::from_slice(&bytes)?)
}

/// Derives the lowest-precedence option layer from `package.json`.
///
/// `year` is used in the generated copyright line. Setup icon and loading
/// animation default to the toolset's bundled resources when those exist.
pub fn derive_defaults(
    pkg: &PackageJson,
    toolset: &Toolset,
    year: i32,
    logger: &dyn Logger,
) -> Overrides {
    let author_name = pkg.author.as_ref().and_then(Author::name);
    let authors = author_name.clone().map(|a| vec![a]);

    let copyright = pkg.copyright.clone().or_else(|| {
        author_name
            .as_ref()
            .map(|a| format!("Copyright \u{a9} {} {}", year, a))
    });

    let homepage = pkg
        .homepage
        .clone()
        .or_else(|| pkg.author.as_ref().and_then(Author::url));

    let icon = toolset.default_icon();
    let animation = toolset.default_animation();

    if author_name.is_none() {
        logger.log("package.json has no usable author; authors must be supplied explicitly");
    }

    Overrides {
        name: pkg.name.clone(),
        product_name: pkg.product_name.clone().or_else(|| pkg.name.clone()),
        description: pkg.description.clone(),
        product_description: pkg
            .product_description
            .clone()
            .or_else(|| pkg.description.clone()),
        version: pkg.version.clone(),
        copyright,
        authors: authors.clone(),
        owners: authors,
        homepage,
        exe: pkg.name.as_ref().map(|n| format!("{}.exe", n)),
        icon,
        animation,
        require_license_acceptance: Some(false),
        tags: Some(Vec::new()),
        no_msi: Some(false),
        ..Default::default()
    }
}
