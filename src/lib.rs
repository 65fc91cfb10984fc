#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
//! An immutable, canonicalizing model of HTTP and HTTPS URLs.
//!
//! This crate restricts the scheme space to `http` and `https` and applies
//! the leniencies of web browsers rather than the strictness of a generic
//! [RFC 3986] parser: authority delimiters may mix `/` and `\`, the contents
//! of IPv6 literals may be percent-encoded, host names are mapped through
//! IDNA, and surrounding ASCII whitespace is trimmed. Every component is kept
//! in canonical percent-encoded form, with decoded views computed on demand.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Examples
//!
//! Parse a URL and read its components:
//!
//! ```
//! use web_url::{Scheme, WebUrl};
//!
//! let url = WebUrl::parse("https://user@example.com/search?q=rust#top")?;
//! assert_eq!(url.scheme(), Scheme::Https);
//! assert_eq!(url.username(), "user");
//! assert_eq!(url.host(), "example.com");
//! assert_eq!(url.port(), 443);
//! assert_eq!(url.encoded_path(), "/search");
//! assert_eq!(url.query_parameter("q").as_deref(), Some("rust"));
//! assert_eq!(url.fragment().as_deref(), Some("top"));
//! # Ok::<_, web_url::ParseError>(())
//! ```
//!
//! Build one from parts:
//!
//! ```
//! use web_url::{Builder, Scheme};
//!
//! let url = Builder::new()
//!     .scheme(Scheme::Http)
//!     .host("example.com")
//!     .add_path_segment("a b")
//!     .add_query_parameter("k", Some("v"))
//!     .build()?;
//! assert_eq!(url.as_str(), "http://example.com/a%20b?k=v");
//! # Ok::<_, web_url::BuildError>(())
//! ```
//!
//! Resolve a reference against a base:
//!
//! ```
//! use web_url::WebUrl;
//!
//! let base = WebUrl::parse("http://a/b/c/d;p?q")?;
//! assert_eq!(base.resolve("../../g").unwrap().as_str(), "http://a/g");
//! # Ok::<_, web_url::ParseError>(())
//! ```

mod builder;
mod component;
mod encoding;
mod error;
mod host;
mod parser;
mod path;
mod query;
mod url;

pub mod suffix;

pub use crate::{
    builder::Builder,
    component::Scheme,
    error::{BuildError, ParseError},
    url::WebUrl,
};
