//! The mutable counterpart of [`WebUrl`].

use crate::{
    component::Scheme,
    encoding::{self, Encode},
    error::{BuildError, BuildErrorKind},
    host, parser, path,
    query::{parse_pairs, write_pairs, Pair},
    url::WebUrl,
};
use core::fmt;

const USERNAME: Encode = Encode::new(encoding::USERINFO);
const USERNAME_ENCODED: Encode = Encode::new(encoding::USERINFO).already_encoded();
const PASSWORD: Encode = Encode::new(encoding::USERINFO);
const PASSWORD_ENCODED: Encode = Encode::new(encoding::USERINFO).already_encoded();
const PATH_SEGMENT: Encode = Encode::new(encoding::PATH_SEGMENT);
const PATH_SEGMENT_ENCODED: Encode = Encode::new(encoding::PATH_SEGMENT).already_encoded();
const QUERY: Encode = Encode::new(encoding::QUERY).plus_is_space();
const QUERY_ENCODED: Encode = Encode::new(encoding::QUERY)
    .already_encoded()
    .plus_is_space();
const QUERY_COMPONENT: Encode = Encode::new(encoding::QUERY_COMPONENT).plus_is_space();
const QUERY_COMPONENT_ENCODED: Encode = Encode::new(encoding::QUERY_COMPONENT_REENCODE)
    .already_encoded()
    .plus_is_space();
const FRAGMENT: Encode = Encode::new(encoding::FRAGMENT).unicode_allowed();
const FRAGMENT_ENCODED: Encode = Encode::new(encoding::FRAGMENT)
    .already_encoded()
    .unicode_allowed();

/// A builder of [`WebUrl`]s.
///
/// A builder is created empty with [`new`](Self::new), or seeded with a URL's
/// components by [`WebUrl::new_builder`]. Every component has a setter taking
/// the human-readable decoded form and a twin taking the percent-encoded
/// form, which re-encodes only what would corrupt the URL structure.
///
/// # Examples
///
/// ```
/// use web_url::{Builder, Scheme};
///
/// let url = Builder::new()
///     .scheme(Scheme::Https)
///     .username("user")
///     .host("example.com")
///     .port(8443)
///     .add_path_segment("over")
///     .add_path_segment("there")
///     .add_query_parameter("name", Some("ferret"))
///     .fragment(Some("nose"))
///     .build()?;
/// assert_eq!(
///     url.as_str(),
///     "https://user@example.com:8443/over/there?name=ferret#nose"
/// );
/// # Ok::<_, web_url::BuildError>(())
/// ```
///
/// # Contract violations
///
/// [`build`](Self::build) reports a missing scheme or host as a
/// [`BuildError`]. Everything else a builder can be misused for (an invalid
/// host or port argument, an out-of-range segment index, a dot segment passed
/// to [`set_path_segment`](Self::set_path_segment)) is a programming error
/// and panics.
#[must_use]
#[derive(Clone)]
pub struct Builder {
    pub(crate) scheme: Option<Scheme>,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path_segments: Vec<String>,
    pub(crate) query: Option<Vec<Pair>>,
    pub(crate) fragment: Option<String>,
}

impl Builder {
    /// Creates an empty builder whose path is the root `/`.
    pub fn new() -> Self {
        Self {
            scheme: None,
            username: String::new(),
            password: String::new(),
            host: None,
            port: None,
            path_segments: vec![String::new()],
            query: None,
            fragment: None,
        }
    }

    /// Sets the scheme.
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the username from its decoded form.
    pub fn username(mut self, username: &str) -> Self {
        self.username = USERNAME.apply(username).into_owned();
        self
    }

    /// Sets the username from its percent-encoded form.
    pub fn encoded_username(mut self, username: &str) -> Self {
        self.username = USERNAME_ENCODED.apply(username).into_owned();
        self
    }

    /// Sets the password from its decoded form.
    pub fn password(mut self, password: &str) -> Self {
        self.password = PASSWORD.apply(password).into_owned();
        self
    }

    /// Sets the password from its percent-encoded form.
    pub fn encoded_password(mut self, password: &str) -> Self {
        self.password = PASSWORD_ENCODED.apply(password).into_owned();
        self
    }

    /// Sets the host, canonicalizing it first.
    ///
    /// Accepts a domain name (Unicode or already in IDNA ASCII form), a
    /// dotted-quad IPv4 address, or an IPv6 address with or without square
    /// brackets.
    ///
    /// # Panics
    ///
    /// Panics if `host` does not canonicalize.
    ///
    /// # Examples
    ///
    /// ```
    /// use web_url::WebUrl;
    ///
    /// let base = WebUrl::parse("http://example.com/")?;
    /// let url = base.new_builder().host("[::0001]").build()?;
    /// assert_eq!(url.as_str(), "http://[::1]/");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn host(mut self, host: &str) -> Self {
        match host::canonicalize(host) {
            Some(canonical) => self.host = Some(canonical),
            None => panic!("unexpected host: {host}"),
        }
        self
    }

    /// Sets an explicit port.
    ///
    /// # Panics
    ///
    /// Panics if `port` is zero.
    pub fn port(mut self, port: u16) -> Self {
        assert!(port != 0, "unexpected port: 0");
        self.port = Some(port);
        self
    }

    /// Appends one path segment given in decoded form. A `/` within the
    /// segment is percent-encoded, never a separator.
    pub fn add_path_segment(mut self, segment: &str) -> Self {
        self.push_segment(segment, false, false);
        self
    }

    /// Appends one path segment given in encoded form. Dot segments still
    /// resolve: `"."` is dropped and `".."` pops the previous segment.
    pub fn add_encoded_path_segment(mut self, segment: &str) -> Self {
        self.push_segment(segment, false, true);
        self
    }

    /// Appends path segments split on `/` (or `\`) from decoded input.
    ///
    /// If the current path ends with a slash, the first new segment fills
    /// that empty slot; otherwise the path gains a slash first.
    pub fn add_path_segments(mut self, segments: &str) -> Self {
        self.add_split_segments(segments, false);
        self
    }

    /// Appends path segments split on `/` (or `\`) from encoded input.
    pub fn add_encoded_path_segments(mut self, segments: &str) -> Self {
        self.add_split_segments(segments, true);
        self
    }

    /// Replaces the path segment at `index` with decoded input.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, or if the canonicalized segment is
    /// `.` or `..` (which cannot be pinned to a position).
    pub fn set_path_segment(mut self, index: usize, segment: &str) -> Self {
        let canonical = PATH_SEGMENT.apply(segment);
        if path::is_dot(&canonical) || path::is_dot_dot(&canonical) {
            panic!("unexpected path segment: {segment}");
        }
        self.path_segments[index] = canonical.into_owned();
        self
    }

    /// Replaces the path segment at `index` with encoded input.
    ///
    /// # Panics
    ///
    /// As [`set_path_segment`](Self::set_path_segment).
    pub fn set_encoded_path_segment(mut self, index: usize, segment: &str) -> Self {
        let canonical = PATH_SEGMENT_ENCODED.apply(segment);
        if path::is_dot(&canonical) || path::is_dot_dot(&canonical) {
            panic!("unexpected path segment: {segment}");
        }
        self.path_segments[index] = canonical.into_owned();
        self
    }

    /// Removes the path segment at `index`. Removing the last one leaves
    /// the root path.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_path_segment(mut self, index: usize) -> Self {
        self.path_segments.remove(index);
        if self.path_segments.is_empty() {
            self.path_segments.push(String::new());
        }
        self
    }

    /// Replaces the whole path from its encoded form, which must start
    /// with `/`. Dot segments resolve.
    ///
    /// # Panics
    ///
    /// Panics if `encoded_path` does not start with `/`.
    pub fn encoded_path(mut self, encoded_path: &str) -> Self {
        assert!(
            encoded_path.starts_with('/'),
            "unexpected encoded path: {encoded_path}"
        );
        parser::resolve_path(&mut self, encoded_path, 0, encoded_path.len());
        self
    }

    /// Sets the entire query from one decoded string, or removes it.
    pub fn query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(|q| parse_pairs(&QUERY.apply(q)));
        self
    }

    /// Sets the entire query from one encoded string, or removes it.
    pub fn encoded_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(|q| parse_pairs(&QUERY_ENCODED.apply(q)));
        self
    }

    /// Appends a query parameter from decoded name and value. An absent
    /// value writes no `=`; an empty one writes a bare `=`.
    pub fn add_query_parameter(mut self, name: &str, value: Option<&str>) -> Self {
        self.query.get_or_insert_with(Vec::new).push((
            QUERY_COMPONENT.apply(name).into_owned(),
            value.map(|v| QUERY_COMPONENT.apply(v).into_owned()),
        ));
        self
    }

    /// Appends a query parameter from encoded name and value, keeping the
    /// input's encoding choices.
    pub fn add_encoded_query_parameter(mut self, name: &str, value: Option<&str>) -> Self {
        self.query.get_or_insert_with(Vec::new).push((
            QUERY_COMPONENT_ENCODED.apply(name).into_owned(),
            value.map(|v| QUERY_COMPONENT_ENCODED.apply(v).into_owned()),
        ));
        self
    }

    /// Removes every parameter named `name`, then appends `(name, value)`.
    pub fn set_query_parameter(self, name: &str, value: Option<&str>) -> Self {
        self.remove_all_query_parameters(name)
            .add_query_parameter(name, value)
    }

    /// The encoded-input twin of
    /// [`set_query_parameter`](Self::set_query_parameter).
    pub fn set_encoded_query_parameter(self, name: &str, value: Option<&str>) -> Self {
        self.remove_all_encoded_query_parameters(name)
            .add_encoded_query_parameter(name, value)
    }

    /// Removes every query parameter whose decoded name equals `name`.
    ///
    /// If that empties the parameter list the query is removed entirely;
    /// if nothing matched, a present query stays present.
    pub fn remove_all_query_parameters(mut self, name: &str) -> Self {
        let canonical = QUERY_COMPONENT.apply(name);
        self.remove_all_canonical_query_parameters(&canonical);
        self
    }

    /// The encoded-input twin of
    /// [`remove_all_query_parameters`](Self::remove_all_query_parameters).
    pub fn remove_all_encoded_query_parameters(mut self, name: &str) -> Self {
        let canonical = QUERY_COMPONENT_ENCODED.apply(name);
        self.remove_all_canonical_query_parameters(&canonical);
        self
    }

    fn remove_all_canonical_query_parameters(&mut self, canonical_name: &str) {
        if let Some(pairs) = &mut self.query {
            pairs.retain(|(name, _)| name != canonical_name);
            if pairs.is_empty() {
                self.query = None;
            }
        }
    }

    /// Sets the fragment from its decoded form, or removes it.
    pub fn fragment(mut self, fragment: Option<&str>) -> Self {
        self.fragment = fragment.map(|f| FRAGMENT.apply(f).into_owned());
        self
    }

    /// Sets the fragment from its encoded form, or removes it.
    pub fn encoded_fragment(mut self, fragment: Option<&str>) -> Self {
        self.fragment = fragment.map(|f| FRAGMENT_ENCODED.apply(f).into_owned());
        self
    }

    /// Builds the URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheme or the host was never set.
    pub fn build(self) -> Result<WebUrl, BuildError> {
        let (Some(scheme), Some(host)) = (self.scheme, self.host.clone()) else {
            let kind = if self.scheme.is_none() {
                BuildErrorKind::MissingScheme
            } else {
                BuildErrorKind::MissingHost
            };
            return Err(BuildError(kind));
        };
        let url = self.to_string();
        let Builder {
            username,
            password,
            port,
            path_segments,
            query,
            fragment,
            ..
        } = self;
        Ok(WebUrl {
            scheme,
            username,
            password,
            host,
            port: port.unwrap_or_else(|| scheme.default_port()),
            path_segments,
            query,
            fragment,
            url,
        })
    }

    fn push_segment(&mut self, segment: &str, add_trailing_slash: bool, already_encoded: bool) {
        let mode = if already_encoded {
            PATH_SEGMENT_ENCODED
        } else {
            PATH_SEGMENT
        };
        let canonical = mode.apply(segment);
        path::push(&mut self.path_segments, &canonical, add_trailing_slash);
    }

    fn add_split_segments(&mut self, segments: &str, already_encoded: bool) {
        let bytes = segments.as_bytes();
        let mut offset = 0;
        loop {
            let end = parser::delimiter_offset(bytes, offset, bytes.len(), b"/\\");
            let has_trailing_slash = end < bytes.len();
            self.push_segment(&segments[offset..end], has_trailing_slash, already_encoded);
            if !has_trailing_slash {
                return;
            }
            offset = end + 1;
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Builder {
    /// Serializes the builder, tolerating missing components so that partial
    /// state is still printable (`"https:///path"`, `"//host:8080/path"`).
    /// For a complete builder this is the canonical URL serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Some(scheme) => write!(f, "{scheme}://")?,
            None => f.write_str("//")?,
        }

        if !self.username.is_empty() || !self.password.is_empty() {
            f.write_str(&self.username)?;
            if !self.password.is_empty() {
                write!(f, ":{}", self.password)?;
            }
            f.write_str("@")?;
        }

        if let Some(host) = &self.host {
            if host.contains(':') {
                write!(f, "[{host}]")?;
            } else {
                f.write_str(host)?;
            }
        }

        match (self.port, self.scheme) {
            (Some(port), Some(scheme)) if port == scheme.default_port() => {}
            (Some(port), _) => write!(f, ":{port}")?,
            (None, _) => {}
        }

        for segment in &self.path_segments {
            write!(f, "/{segment}")?;
        }

        if let Some(pairs) = &self.query {
            f.write_str("?")?;
            write_pairs(f, pairs)?;
        }

        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
