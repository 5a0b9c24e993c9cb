//! Artifact rename policy.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Computes the destination of a finished artifact.
///
/// Receives the destination directory and the artifact's file name. The
/// returned path is a template: Options fields (`{{name}}`, `{{version}}`, ...)
/// are substituted before the file is moved.
pub type RenameFn = Arc<dyn Fn(&Path, &str) -> PathBuf + Send + Sync>;

/// Default policy: setup executables and MSIs become
/// `{{name}}-{{version}}-setup.<ext>`, everything else keeps its name.
pub fn default_rename() -> RenameFn {
    Arc::new(default_rename_path)
}

/// Path computation behind [`default_rename`].
pub fn default_rename_path(dest: &Path, file_name: &str) -> PathBuf {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext @ ("exe" | "msi")) => dest.join(format!("{{{{name}}}}-{{{{version}}}}-setup.{ext}")),
        _ => dest.join(file_name),
    }
}

/// Builds a rename policy that only swaps the `-setup` suffix of installers.
///
/// `suffixed_rename("installer")` maps `Setup.exe` to
/// `{{name}}-{{version}}-installer.exe`.
pub fn suffixed_rename(suffix: &str) -> RenameFn {
    let suffix = suffix.to_string();
    Arc::new(move |dest: &Path, file_name: &str| {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext @ ("exe" | "msi")) => {
                dest.join(format!("{{{{name}}}}-{{{{version}}}}-{suffix}.{ext}"))
            }
            _ => dest.join(file_name),
        }
    })
}
