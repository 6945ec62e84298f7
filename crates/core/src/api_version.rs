//! API version tokens.
//!
//! Versions are parsed from the `{version}` route segment. Anything that is
//! not a known version is a [`CoreError::Configuration`], never a silent
//! fallback to a default shape.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Supported API versions.
///
/// Adding a version means adding a variant here and registering a rule for
/// every versioned entity in [`crate::mapping::Mappers::build`]; startup fails
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    /// Every version the server is expected to serve.
    pub fn all() -> &'static [ApiVersion] {
        &[ApiVersion::V1, ApiVersion::V2]
    }

    /// Canonical route token, e.g. `"v1"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// Parse a route token. Accepts `v1`, `V1`, `1`, `1.0` and `v1.0`.
    pub fn parse(token: &str) -> Result<Self, CoreError> {
        let trimmed = token.trim();
        let digits = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);
        let major = digits.strip_suffix(".0").unwrap_or(digits);

        match major {
            "1" => Ok(ApiVersion::V1),
            "2" => Ok(ApiVersion::V2),
            _ => Err(CoreError::Configuration(format!(
                "Unsupported API version '{token}'. Supported versions: {}",
                Self::all()
                    .iter()
                    .map(ApiVersion::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_equivalent_spellings() {
        for token in ["v1", "V1", "1", "1.0", "v1.0"] {
            assert_eq!(ApiVersion::parse(token).unwrap(), ApiVersion::V1, "{token}");
        }
        for token in ["v2", "2", "2.0"] {
            assert_eq!(ApiVersion::parse(token).unwrap(), ApiVersion::V2, "{token}");
        }
    }

    #[test]
    fn unknown_version_is_configuration_error() {
        assert_matches!(ApiVersion::parse("v3"), Err(CoreError::Configuration(_)));
        assert_matches!(ApiVersion::parse(""), Err(CoreError::Configuration(_)));
        assert_matches!(ApiVersion::parse("v1.5"), Err(CoreError::Configuration(_)));
    }

    #[test]
    fn error_lists_supported_versions() {
        let err = ApiVersion::parse("v9").unwrap_err().to_string();
        assert!(err.contains("v1, v2"), "{err}");
    }

    #[test]
    fn display_is_route_token() {
        assert_eq!(ApiVersion::V2.to_string(), "v2");
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
    }
}
