//! Code signing method selection for the release tool.

use crate::bundler::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// How the release tool should sign the setup executable.
///
/// Resolved once when options are finalized and never re-derived.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SigningMethod {
    /// Unsigned output.
    #[default]
    None,

    /// Caller-built `signtool` parameter string, passed through verbatim.
    RawParams(String),

    /// PFX certificate and password; parameters are synthesized.
    CertificateCredential {
        /// Path to the certificate file
        file: PathBuf,
        /// Certificate password
        password: String,
    },
}

impl SigningMethod {
    /// Picks the signing method from the raw option values.
    ///
    /// Explicit parameters win over a certificate. A certificate is only used
    /// when both the file and the password are present.
    pub fn resolve(
        sign_with_params: Option<&str>,
        certificate_file: Option<&Path>,
        certificate_password: Option<&str>,
    ) -> Self {
        if let Some(params) = sign_with_params.filter(|p| !p.is_empty()) {
            return Self::RawParams(params.to_string());
        }

        match (certificate_file, certificate_password) {
            (Some(file), Some(password)) => Self::CertificateCredential {
                file: file.to_path_buf(),
                password: password.to_string(),
            },
            _ => Self::None,
        }
    }

    /// Returns true if the release tool should sign its output.
    pub fn is_signed(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Builds the `--signWithParams` value.
    ///
    /// The certificate form quotes every value so paths and product names
    /// with spaces survive the release tool's own argument splitting:
    /// `/a /f "<abs cert>" /p "<password>" /d "<product name>"`.
    pub fn to_params(&self, product_name: Option<&str>) -> Result<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::RawParams(params) => Ok(Some(params.clone())),
            Self::CertificateCredential { file, password } => {
                let file = file
                    .absolutize()
                    .fs_context("resolving certificate file", file)?;

                let mut params = vec![
                    "/a".to_string(),
                    format!("/f \"{}\"", file.display()),
                    format!("/p \"{}\"", password),
                ];
                if let Some(name) = product_name.filter(|n| !n.is_empty()) {
                    params.push(format!("/d \"{}\"", name));
                }

                Ok(Some(params.join(" ")))
            }
        }
    }
}
