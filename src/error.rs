//! Error types.

use core::fmt;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Debug)]
pub(crate) enum ParseErrorKind {
    /// The scheme is missing (`None`) or is not `http` or `https`.
    UnsupportedScheme(Option<String>),
    /// The authority's host did not survive canonicalization.
    /// Carries the raw host slice from the input.
    InvalidHost(String),
    /// The authority's port is not a decimal integer in `1..=65535`.
    /// Carries the raw port slice from the input.
    InvalidPort(String),
}

/// An error occurred when parsing a URL.
///
/// The [`Display`](fmt::Display) output names the first violation found:
///
/// ```
/// use web_url::WebUrl;
///
/// let err = WebUrl::parse("ftp://host/").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Expected URL scheme 'http' or 'https' but was 'ftp'"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ParseError {
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn unsupported_scheme(scheme: Option<String>) -> Self {
        Self {
            kind: ParseErrorKind::UnsupportedScheme(scheme),
        }
    }

    pub(crate) fn invalid_host(raw: &str) -> Self {
        Self {
            kind: ParseErrorKind::InvalidHost(raw.to_owned()),
        }
    }

    pub(crate) fn invalid_port(raw: &str) -> Self {
        Self {
            kind: ParseErrorKind::InvalidPort(raw.to_owned()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnsupportedScheme(None) => {
                f.write_str("Expected URL scheme 'http' or 'https' but no colon was found")
            }
            ParseErrorKind::UnsupportedScheme(Some(scheme)) => {
                write!(f, "Expected URL scheme 'http' or 'https' but was '{scheme}'")
            }
            ParseErrorKind::InvalidHost(raw) => write!(f, "Invalid URL host: \"{raw}\""),
            ParseErrorKind::InvalidPort(raw) => write!(f, "Invalid URL port: \"{raw}\""),
        }
    }
}

impl std::error::Error for ParseError {}

/// Detailed cause of a [`BuildError`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum BuildErrorKind {
    MissingScheme,
    MissingHost,
}

/// An error occurred when building a URL from a [`Builder`] whose
/// scheme or host was never set.
///
/// [`Builder`]: crate::Builder
#[derive(Clone, Copy, Debug)]
pub struct BuildError(pub(crate) BuildErrorKind);

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.0 {
            BuildErrorKind::MissingScheme => "scheme == null",
            BuildErrorKind::MissingHost => "host == null",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for BuildError {}
