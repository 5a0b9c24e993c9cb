//! Staging directory lifecycle.
//!
//! Each run owns a unique root under the staging base:
//!
//! ```text
//! <base>/squirrel-bundle-<uuid>/
//! └── <name>_<version>/
//!     ├── nuget/       descriptor and intermediate package
//!     ├── squirrel/    release artifacts
//!     └── <name>/      copy of the application plus Update.exe
//! ```

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Options,
    utils::fs,
};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix of every staging root directory name.
pub const STAGING_PREFIX: &str = "squirrel-bundle-";

/// Paths of one run's staging tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagingDir {
    root: PathBuf,
    dir: PathBuf,
    name: String,
}

impl StagingDir {
    /// Unique root allocated for this run.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `<name>_<version>` directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn nuget_dir(&self) -> PathBuf {
        self.dir.join("nuget")
    }

    pub fn squirrel_dir(&self) -> PathBuf {
        self.dir.join("squirrel")
    }

    /// Where the application tree is copied.
    pub fn app_dir(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Location of the rendered `.nuspec` descriptor.
    pub fn spec_path(&self) -> PathBuf {
        self.nuget_dir().join(format!("{}.nuspec", self.name))
    }

    /// Deletes the whole staging root.
    pub async fn remove(&self) -> Result<()> {
        fs::remove_dir_all(&self.root).await
    }
}

/// Creates the staging tree for `options` under `base`.
///
/// # Errors
///
/// [`Error::Staging`] wrapping the filesystem cause. Nothing is cleaned up on
/// failure.
pub async fn create_staging_dir(base: &Path, options: &Options) -> Result<StagingDir> {
    options.log("Creating temporary directory");
    let staging = allocate(base, options).await.map_err(|e| Error::Staging(Box::new(e)))?;

    options.log(&format!(
        "Creating subdirectories under {}",
        staging.path().display()
    ));
    let (nuget, squirrel) = (staging.nuget_dir(), staging.squirrel_dir());
    tokio::try_join!(
        async {
            tokio::fs::create_dir_all(&nuget)
                .await
                .fs_context("creating directory", &nuget)
        },
        async {
            tokio::fs::create_dir_all(&squirrel)
                .await
                .fs_context("creating directory", &squirrel)
        },
    )
    .map_err(|e| Error::Staging(Box::new(e)))?;

    Ok(staging)
}

async fn allocate(base: &Path, options: &Options) -> Result<StagingDir> {
    let root = base.join(format!("{}{}", STAGING_PREFIX, Uuid::new_v4()));
    let dir = root.join(options.staging_name());
    tokio::fs::create_dir_all(&dir)
        .await
        .fs_context("creating directory", &dir)?;
    Ok(StagingDir {
        root,
        dir,
        name: options.name.clone(),
    })
}
