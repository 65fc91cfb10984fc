//! URL components.

use crate::error::ParseError;
use core::fmt;
use core::str::FromStr;

/// The scheme component of a [`WebUrl`]: either `http` or `https`.
///
/// Scheme names are *case-insensitive*; the canonical form is lowercase.
///
/// [`WebUrl`]: crate::WebUrl
///
/// # Examples
///
/// ```
/// use web_url::{Scheme, WebUrl};
///
/// let url = WebUrl::parse("HTTP://example.com/")?;
/// assert_eq!(url.scheme(), Scheme::Http);
/// assert_eq!(url.scheme().as_str(), "http");
/// assert_eq!(url.scheme().default_port(), 80);
/// # Ok::<_, web_url::ParseError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Cleartext HTTP, default port 80.
    Http,
    /// HTTP over TLS, default port 443.
    Https,
}

impl Scheme {
    /// Returns the canonical (lowercase) scheme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Returns the port used when a URL carries no explicit port:
    /// 80 for `http` and 443 for `https`, as registered at IANA.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    /// Converts a scheme name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `Err` for any name other than `http` or `https`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Scheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Scheme::Https)
        } else {
            Err(ParseError::unsupported_scheme(Some(s.to_owned())))
        }
    }
}
