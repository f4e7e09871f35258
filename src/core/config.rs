//! Build configuration parsing and validation.
//!
//! Flag values arrive as raw strings from the CLI layer; everything here is
//! validated before any side effect occurs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("\"{flag}\" flag is not set")]
    NotSet { flag: &'static str },

    #[error("invalid value {value:?} provided to the parameter \"{flag}\"")]
    InvalidValue { flag: &'static str, value: String },
}

/// Target Debian architecture.
///
/// Upstream release artifacts name architectures differently from Debian
/// ([`platform_token`](Self::platform_token) vs [`as_str`](Self::as_str));
/// the control file always carries the Debian name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Debian architecture name, as stamped into the control file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    /// Architecture token used in upstream release artifact names.
    pub fn platform_token(self) -> &'static str {
        match self {
            Self::Amd64 => "x64",
            Self::Arm64 => "arm64",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What this invocation should do, validated once from the raw flag values
/// and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildRequest {
    /// Remove build artifacts and exit.
    Clean,
    /// Download, assemble and build the package.
    Package { arch: Arch, version: String },
}

impl BuildRequest {
    /// Validate raw flag values into a build request.
    ///
    /// Clean mode short-circuits: it never requires `arch` or `version`.
    /// Otherwise `arch` must be exactly `amd64` or `arm64` and `version`
    /// must be non-empty, with "not set" and "invalid value" reported as
    /// distinct errors.
    pub fn from_flags(arch: &str, version: &str, clean: &str) -> Result<Self, ConfigError> {
        let clean = match clean {
            "true" => true,
            "false" => false,
            other => {
                return Err(ConfigError::InvalidValue {
                    flag: "clean",
                    value: other.to_string(),
                });
            }
        };

        if clean {
            return Ok(Self::Clean);
        }

        let arch = match arch {
            "amd64" => Arch::Amd64,
            "arm64" => Arch::Arm64,
            "" => return Err(ConfigError::NotSet { flag: "arch" }),
            other => {
                return Err(ConfigError::InvalidValue {
                    flag: "arch",
                    value: other.to_string(),
                });
            }
        };

        if version.is_empty() {
            return Err(ConfigError::NotSet { flag: "version" });
        }

        Ok(Self::Package {
            arch,
            version: version.to_string(),
        })
    }
}
