//! Partial option records and their merge/finalize rules.

use super::{
    Options, RenameFn, SharedLogger, SigningMethod,
    version::normalize_version,
};
use crate::bundler::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name used when neither metadata nor caller provide one.
pub const DEFAULT_NAME: &str = "electron";

/// Version used when neither metadata nor caller provide one.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// A partial options record.
///
/// Used for every layer of configuration: explicit per-call overrides, the
/// caller's option bag (e.g. a `--config` JSON file) and the defaults derived
/// from `package.json`. Layers are combined with [`Overrides::layer_over`] and
/// turned into a complete [`Options`] by [`Overrides::finalize`].
///
/// # JSON Format
///
/// ```json
/// {
///   "productDescription": "Just a test.",
///   "bin": "bartest.exe",
///   "tags": ["Utility"],
///   "remoteReleases": "https://updates.example.com/bar/"
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overrides {
    pub name: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub product_description: Option<String>,
    pub version: Option<String>,
    pub copyright: Option<String>,
    pub authors: Option<Vec<String>>,
    pub owners: Option<Vec<String>>,
    pub homepage: Option<String>,
    #[serde(alias = "bin")]
    pub exe: Option<String>,
    pub icon: Option<PathBuf>,
    pub animation: Option<PathBuf>,
    pub icon_url: Option<String>,
    pub license_url: Option<String>,
    pub require_license_acceptance: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub certificate_file: Option<PathBuf>,
    pub certificate_password: Option<String>,
    pub sign_with_params: Option<String>,
    pub remote_releases: Option<String>,
    pub no_msi: Option<bool>,
}

impl Overrides {
    /// Returns `self` with every unset field taken from `lower`.
    pub fn layer_over(self, lower: Overrides) -> Overrides {
        Overrides {
            name: self.name.or(lower.name),
            product_name: self.product_name.or(lower.product_name),
            description: self.description.or(lower.description),
            product_description: self.product_description.or(lower.product_description),
            version: self.version.or(lower.version),
            copyright: self.copyright.or(lower.copyright),
            authors: self.authors.or(lower.authors),
            owners: self.owners.or(lower.owners),
            homepage: self.homepage.or(lower.homepage),
            exe: self.exe.or(lower.exe),
            icon: self.icon.or(lower.icon),
            animation: self.animation.or(lower.animation),
            icon_url: self.icon_url.or(lower.icon_url),
            license_url: self.license_url.or(lower.license_url),
            require_license_acceptance: self
                .require_license_acceptance
                .or(lower.require_license_acceptance),
            tags: self.tags.or(lower.tags),
            certificate_file: self.certificate_file.or(lower.certificate_file),
            certificate_password: self.certificate_password.or(lower.certificate_password),
            sign_with_params: self.sign_with_params.or(lower.sign_with_params),
            remote_releases: self.remote_releases.or(lower.remote_releases),
            no_msi: self.no_msi.or(lower.no_msi),
        }
    }

    /// Validates the merged record and builds the complete [`Options`].
    ///
    /// # Errors
    ///
    /// - [`Error::Metadata`] if `description` or `authors` is missing or empty
    pub fn finalize(
        self,
        src: PathBuf,
        dest: PathBuf,
        rename: RenameFn,
        logger: SharedLogger,
    ) -> Result<Options> {
        let name = non_empty(self.name).unwrap_or_else(|| DEFAULT_NAME.to_string());
        let version = non_empty(self.version).unwrap_or_else(|| DEFAULT_VERSION.to_string());

        let description = non_empty(self.description)
            .ok_or_else(|| Error::metadata("missing required option `description`"))?;

        let authors = self
            .authors
            .filter(|a| a.iter().any(|s| !s.is_empty()))
            .ok_or_else(|| Error::metadata("missing required option `authors`"))?;
        let owners = self.owners.unwrap_or_else(|| authors.clone());

        let signing = SigningMethod::resolve(
            self.sign_with_params.as_deref(),
            self.certificate_file.as_deref(),
            self.certificate_password.as_deref(),
        );

        let product_description = non_empty(self.product_description)
            .unwrap_or_else(|| description.clone());
        let exe = non_empty(self.exe).unwrap_or_else(|| format!("{}.exe", name));
        let nuget_version = normalize_version(&version);

        Ok(Options {
            name,
            product_name: non_empty(self.product_name),
            description,
            product_description,
            version,
            nuget_version,
            copyright: self.copyright,
            authors,
            owners,
            homepage: self.homepage,
            exe,
            icon: self.icon,
            animation: self.animation,
            icon_url: self.icon_url,
            license_url: self.license_url,
            require_license_acceptance: self.require_license_acceptance.unwrap_or(false),
            tags: self.tags.unwrap_or_default(),
            certificate_file: self.certificate_file,
            certificate_password: self.certificate_password,
            sign_with_params: self.sign_with_params,
            remote_releases: self.remote_releases,
            no_msi: self.no_msi.unwrap_or(false),
            src,
            dest,
            signing,
            rename,
            logger,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{NoopLogger, default_rename};
    use std::sync::Arc;

    fn finalize(overrides: Overrides) -> Result<Options> {
        overrides.finalize(
            PathBuf::from("app"),
            PathBuf::from("out"),
            default_rename(),
            Arc::new(NoopLogger),
        )
    }

    fn required() -> Overrides {
        Overrides {
            description: Some("An app".into()),
            authors: Some(vec!["Jane".into()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_upper_layer_wins() {
        let explicit = Overrides {
            name: Some("explicit".into()),
            ..Default::default()
        };
        let bag = Overrides {
            name: Some("bag".into()),
            version: Some("1.0.0".into()),
            ..Default::default()
        };
        let defaults = Overrides {
            name: Some("meta".into()),
            version: Some("0.1.0".into()),
            description: Some("from metadata".into()),
            ..Default::default()
        };

        let merged = explicit.layer_over(bag).layer_over(defaults);
        assert_eq!(merged.name.as_deref(), Some("explicit"));
        assert_eq!(merged.version.as_deref(), Some("1.0.0"));
        assert_eq!(merged.description.as_deref(), Some("from metadata"));
    }

    #[test]
    fn test_hardcoded_fallbacks() {
        let options = finalize(required()).expect("options");
        assert_eq!(options.name, "electron");
        assert_eq!(options.version, "0.0.0");
        assert_eq!(options.exe, "electron.exe");
        assert_eq!(options.owners, vec!["Jane".to_string()]);
        assert_eq!(options.product_description, "An app");
        assert!(!options.no_msi);
    }

    #[test]
    fn test_missing_description_is_reported_by_name() {
        let err = finalize(Overrides {
            authors: Some(vec!["Jane".into()]),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Metadata { .. }));
        assert!(err.to_string().contains("`description`"));
    }

    #[test]
    fn test_missing_authors_is_reported_by_name() {
        let err = finalize(Overrides {
            description: Some("An app".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("`authors`"));
    }

    #[test]
    fn test_remote_releases_passed_through_verbatim() {
        let options = finalize(Overrides {
            remote_releases: Some("\\\\fileserver\\releases".into()),
            ..required()
        })
        .expect("options");
        assert_eq!(options.remote_releases.as_deref(), Some(r"\\fileserver\releases"));
    }

    #[test]
    fn test_bin_alias_and_camel_case_json() {
        let bag: Overrides = serde_json::from_str(
            r#"{"bin": "bartest.exe", "productDescription": "Just a test.", "noMsi": true}"#,
        )
        .expect("json");
        assert_eq!(bag.exe.as_deref(), Some("bartest.exe"));
        assert_eq!(bag.product_description.as_deref(), Some("Just a test."));
        assert_eq!(bag.no_msi, Some(true));
    }

    #[test]
    fn test_signing_resolved_once() {
        let options = finalize(Overrides {
            certificate_file: Some("cert.pfx".into()),
            certificate_password: Some("pw".into()),
            ..required()
        })
        .expect("options");
        assert!(matches!(options.signing, SigningMethod::CertificateCredential { .. }));
    }

    #[test]
    fn test_nuget_version_derived() {
        let options = finalize(Overrides {
            version: Some("1.0.0-beta.3".into()),
            ..required()
        })
        .expect("options");
        assert_eq!(options.version, "1.0.0-beta.3");
        assert_eq!(options.nuget_version, "1.0.0-beta3");
    }
}
