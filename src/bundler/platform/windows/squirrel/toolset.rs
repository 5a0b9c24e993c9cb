//! Vendored NuGet/Squirrel toolset location.
//!
//! The tools ship alongside the binary rather than being installed on the
//! host:
//!
//! ```text
//! vendor/
//! ├── nuget/NuGet.exe
//! ├── squirrel/{Squirrel.exe, Squirrel.com, Squirrel-Mono.exe, SyncReleases.exe}
//! └── resources/{icon.ico, animation.gif}
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the vendor directory.
pub const VENDOR_DIR_ENV: &str = "SQUIRREL_VENDOR_DIR";

/// Paths to the vendored tools and default resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolset {
    root: PathBuf,
}

impl Toolset {
    /// Uses `root` as the vendor directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the vendor directory: `$SQUIRREL_VENDOR_DIR`, else `vendor/`
    /// next to the running executable, else `./vendor`.
    pub fn locate() -> Self {
        if let Some(dir) = std::env::var_os(VENDOR_DIR_ENV).filter(|v| !v.is_empty()) {
            log::debug!("Using vendor directory from {}", VENDOR_DIR_ENV);
            return Self::new(dir);
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("vendor")));
        match beside_exe {
            Some(dir) if dir.is_dir() => Self::new(dir),
            _ => {
                log::debug!("No vendor directory beside executable, using ./vendor");
                Self::new("vendor")
            }
        }
    }

    /// The vendor directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn nuget(&self) -> PathBuf {
        self.root.join("nuget").join("NuGet.exe")
    }

    /// Squirrel's updater, shipped inside the app as `Update.exe`.
    pub fn update_exe(&self) -> PathBuf {
        self.squirrel("Squirrel.exe")
    }

    /// Release tool for the given host.
    pub fn releasify_tool(&self, windows_host: bool) -> PathBuf {
        if windows_host {
            self.squirrel("Squirrel.com")
        } else {
            self.squirrel("Squirrel-Mono.exe")
        }
    }

    pub fn sync_releases(&self) -> PathBuf {
        self.squirrel("SyncReleases.exe")
    }

    /// Bundled setup icon, if present.
    pub fn default_icon(&self) -> Option<PathBuf> {
        self.resource("icon.ico")
    }

    /// Bundled loading animation, if present.
    pub fn default_animation(&self) -> Option<PathBuf> {
        self.resource("animation.gif")
    }

    fn squirrel(&self, file: &str) -> PathBuf {
        self.root.join("squirrel").join(file)
    }

    fn resource(&self, file: &str) -> Option<PathBuf> {
        let path = self.root.join("resources").join(file);
        path.is_file().then_some(path)
    }
}
