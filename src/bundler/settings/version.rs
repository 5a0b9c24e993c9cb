//! NuGet version normalization.

/// Normalize a semantic version for the NuGet/Squirrel version scheme.
///
/// Squirrel.Windows consumes NuGet 2 ("SemVer 1") versions, which allow a
/// single pre-release label with no dot separators and no build metadata.
/// This function:
/// - drops `+build` metadata
/// - keeps `major.minor.patch` as is
/// - removes every `.` from the pre-release suffix
///
/// Examples:
/// - "1.2.3" -> "1.2.3"
/// - "1.2.3-beta.1" -> "1.2.3-beta1"
/// - "2.0.0-rc.1.2" -> "2.0.0-rc12"
/// - "1.0.0+sha.1a2b" -> "1.0.0"
/// - "1.2-alpha.3" -> "1.2-alpha3" (non-semver input is split textually)
pub fn normalize_version(version: &str) -> String {
    if let Ok(parsed) = semver::Version::parse(version) {
        let core = format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch);
        if parsed.pre.is_empty() {
            return core;
        }
        return format!("{}-{}", core, parsed.pre.as_str().replace('.', ""));
    }

    let without_build = version.split('+').next().unwrap_or(version);
    match without_build.split_once('-') {
        Some((core, pre)) => format!("{}-{}", core, pre.replace('.', "")),
        None => without_build.to_string(),
    }
}
