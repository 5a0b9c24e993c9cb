//! Host detection for the compatibility runtime used on non-Windows hosts.
//!
//! The vendored NuGet and Squirrel tools are .NET executables. Outside Windows
//! they run under `mono`; when it is missing we tell the user which package
//! manager and package to use.

use std::sync::LazyLock;

/// Whether `dnf` is available (Fedora/RHEL family).
///
/// Cached result to avoid repeated PATH lookups.
pub static HAS_DNF: LazyLock<bool> = LazyLock::new(|| match which::which("dnf") {
    Ok(path) => {
        log::debug!("Found dnf at: {}", path.display());
        true
    }
    Err(e) => {
        log::debug!("dnf not found in PATH: {}", e);
        false
    }
});

/// Package manager and package name that provide the runtime on this host.
pub fn runtime_package() -> (&'static str, &'static str) {
    runtime_package_for(cfg!(target_os = "macos"), *HAS_DNF)
}

/// [`runtime_package`] with the host facts supplied explicitly.
pub fn runtime_package_for(macos: bool, has_dnf: bool) -> (&'static str, &'static str) {
    if macos {
        ("brew", "mono")
    } else if has_dnf {
        ("dnf", "mono-core")
    } else {
        ("apt", "mono-runtime")
    }
}

/// Message shown when the runtime executable cannot be spawned.
pub fn missing_runtime_hint() -> String {
    let (installer, package) = runtime_package();
    format_hint(installer, package)
}

fn format_hint(installer: &str, package: &str) -> String {
    format!(
        "Your system is missing the {package} package. Try, e.g. '{installer} install {package}'"
    )
}
