//! Command line argument parsing and validation.
//!
//! Option flags form the explicit override layer; `--config` supplies the
//! option bag beneath them.

use crate::bundler::{Overrides, VENDOR_DIR_ENV};
use clap::Parser;
use std::path::PathBuf;

/// Squirrel.Windows installer bundler for pre-built Electron apps
#[derive(Parser, Debug, Default)]
#[command(
    name = "kodegen_bundler_squirrel",
    version,
    about = "Create a Squirrel.Windows installer for a built Electron app",
    long_about = "Creates a Windows installer (NuGet package, RELEASES, Setup.exe and optionally Setup.msi) \
from a built Electron application directory.

Metadata is read from the app's package.json (resources/app.asar or resources/app/package.json) \
and can be overridden by a JSON config file and by individual flags.

Usage:
  kodegen_bundler_squirrel --src dist/app/ --dest dist/installer/
  kodegen_bundler_squirrel --src dist/app/ --dest dist/installer/ --config config.json

Exit code 0 = every artifact exists under --dest."
)]
pub struct Args {
    /// Directory that contains your built Electron app (e.g. with `electron-packager`)
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Directory that will contain the resulting Windows installer
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    /// JSON file that contains the metadata for your application
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the vendored NuGet/Squirrel tools
    #[arg(long, value_name = "DIR", env = VENDOR_DIR_ENV)]
    pub vendor_dir: Option<PathBuf>,

    /// Leave the staging directory on disk after the run
    #[arg(long)]
    pub keep_staging: bool,

    /// Print pipeline progress messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Package id
    #[arg(long)]
    pub name: Option<String>,

    /// Human-readable product name
    #[arg(long, alias = "productName")]
    pub product_name: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Long description
    #[arg(long, alias = "productDescription")]
    pub product_description: Option<String>,

    /// Application version (`--version` prints this tool's version)
    #[arg(long = "app-version", value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Copyright line
    #[arg(long)]
    pub copyright: Option<String>,

    /// Package authors (repeatable)
    #[arg(long = "author", value_name = "AUTHOR")]
    pub authors: Vec<String>,

    /// Package owners (repeatable)
    #[arg(long = "owner", value_name = "OWNER")]
    pub owners: Vec<String>,

    /// Project homepage URL
    #[arg(long)]
    pub homepage: Option<String>,

    /// Main executable name inside the app directory
    #[arg(long, alias = "bin")]
    pub exe: Option<String>,

    /// Setup icon (.ico)
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Loading animation shown during install (.gif)
    #[arg(long, value_name = "FILE")]
    pub animation: Option<PathBuf>,

    /// Icon URL for the package descriptor
    #[arg(long, alias = "iconUrl")]
    pub icon_url: Option<String>,

    /// License URL for the package descriptor
    #[arg(long, alias = "licenseUrl")]
    pub license_url: Option<String>,

    /// Require license acceptance on install
    #[arg(long, alias = "requireLicenseAcceptance")]
    pub require_license_acceptance: bool,

    /// Package tags (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Certificate used to sign the installer
    #[arg(long, alias = "certificateFile", value_name = "FILE")]
    pub certificate_file: Option<PathBuf>,

    /// Password for the signing certificate
    #[arg(long, alias = "certificatePassword")]
    pub certificate_password: Option<String>,

    /// Raw signtool parameters (overrides the certificate options)
    #[arg(long, alias = "signWithParams")]
    pub sign_with_params: Option<String>,

    /// Release feed URL used to build delta packages
    #[arg(long, alias = "remoteReleases", value_name = "URL")]
    pub remote_releases: Option<String>,

    /// Do not generate an MSI
    #[arg(long, alias = "noMsi")]
    pub no_msi: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.src.as_os_str().is_empty() {
            return Err("--src cannot be empty".to_string());
        }
        if self.dest.as_os_str().is_empty() {
            return Err("--dest cannot be empty".to_string());
        }
        if self.src == self.dest {
            return Err("--src and --dest must be different directories".to_string());
        }
        Ok(())
    }

    /// Flags given on the command line, as the explicit override layer.
    ///
    /// Boolean switches only override when set.
    pub fn overrides(&self) -> Overrides {
        let list = |v: &Vec<String>| (!v.is_empty()).then(|| v.clone());
        Overrides {
            name: self.name.clone(),
            product_name: self.product_name.clone(),
            description: self.description.clone(),
            product_description: self.product_description.clone(),
            version: self.app_version.clone(),
            copyright: self.copyright.clone(),
            authors: list(&self.authors),
            owners: list(&self.owners),
            homepage: self.homepage.clone(),
            exe: self.exe.clone(),
            icon: self.icon.clone(),
            animation: self.animation.clone(),
            icon_url: self.icon_url.clone(),
            license_url: self.license_url.clone(),
            require_license_acceptance: self.require_license_acceptance.then_some(true),
            tags: list(&self.tags),
            certificate_file: self.certificate_file.clone(),
            certificate_password: self.certificate_password.clone(),
            sign_with_params: self.sign_with_params.clone(),
            remote_releases: self.remote_releases.clone(),
            no_msi: self.no_msi.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{NoopLogger, SigningMethod, default_rename};
    use clap::CommandFactory;
    use std::sync::Arc;

    #[test]
    fn test_command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_app_version_does_not_shadow_version_flag() {
        let args = parse(&["--app-version", "1.2.3-beta.1"]);
        assert_eq!(args.overrides().version.as_deref(), Some("1.2.3-beta.1"));

        let err = Args::try_parse_from(["kodegen_bundler_squirrel", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(
            ["kodegen_bundler_squirrel", "--src", "app", "--dest", "out"]
                .iter()
                .chain(args),
        )
        .expect("parse")
    }

    #[test]
    fn test_required_arguments() {
        assert!(Args::try_parse_from(["kodegen_bundler_squirrel", "--src", "app"]).is_err());
        let args = parse(&[]);
        assert_eq!(args.src, PathBuf::from("app"));
        assert!(args.validate().is_ok());
        assert_eq!(args.overrides(), Overrides::default());
    }

    #[test]
    fn test_camel_case_aliases() {
        let args = parse(&[
            "--certificateFile",
            "cert.pfx",
            "--certificatePassword",
            "pw",
            "--noMsi",
            "--bin",
            "bartest.exe",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.certificate_file, Some(PathBuf::from("cert.pfx")));
        assert_eq!(overrides.certificate_password.as_deref(), Some("pw"));
        assert_eq!(overrides.no_msi, Some(true));
        assert_eq!(overrides.exe.as_deref(), Some("bartest.exe"));
    }

    #[test]
    fn test_repeatable_lists() {
        let overrides = parse(&["--author", "Jane", "--author", "John", "--tag", "Utility"])
            .overrides();
        assert_eq!(overrides.authors, Some(vec!["Jane".into(), "John".into()]));
        assert_eq!(overrides.owners, None);
        assert_eq!(overrides.tags, Some(vec!["Utility".into()]));
    }

    #[test]
    fn test_validation() {
        let same = Args::try_parse_from(["kodegen_bundler_squirrel", "--src", "x", "--dest", "x"])
            .expect("parse");
        assert!(same.validate().is_err());
    }

    #[test]
    fn test_password_flag_combines_with_certificate_from_config() {
        let args = parse(&["--certificate-password", "pw"]);
        assert!(args.validate().is_ok());

        let bag = Overrides {
            certificate_file: Some(PathBuf::from("cert.pfx")),
            description: Some("Just a test.".into()),
            authors: Some(vec!["Jane".into()]),
            ..Default::default()
        };
        let options = args
            .overrides()
            .layer_over(bag)
            .finalize(
                "app".into(),
                "out".into(),
                default_rename(),
                Arc::new(NoopLogger),
            )
            .expect("options");
        assert_eq!(
            options.signing,
            SigningMethod::CertificateCredential {
                file: PathBuf::from("cert.pfx"),
                password: "pw".into(),
            }
        );
    }
}
