//! The URL parser: a single byte-directed pass that canonicalizes each
//! component into a [`Builder`] as it is recognized.
//!
//! The same pass implements reference resolution. With a base URL supplied,
//! a missing scheme, authority, path or query falls back to the base per
//! RFC 3986 section 5, with two deviations the scheme restriction brings:
//! a reference carrying the base's own scheme and fewer than two authority
//! slashes is treated as if the scheme were absent, and any run of `/` and
//! `\` after the scheme announces an authority.

use crate::{
    builder::Builder,
    component::Scheme,
    encoding::{self, Encode},
    error::ParseError,
    host, path,
    query::parse_pairs,
    url::WebUrl,
};

const USERNAME: Encode = Encode::new(encoding::USERINFO).already_encoded();
const PASSWORD: Encode = Encode::new(encoding::USERINFO).already_encoded();
const PATH_SEGMENT: Encode = Encode::new(encoding::PATH_SEGMENT).already_encoded();
const QUERY: Encode = Encode::new(encoding::QUERY).already_encoded().plus_is_space();
const FRAGMENT: Encode = Encode::new(encoding::FRAGMENT)
    .already_encoded()
    .unicode_allowed();
const PORT: Encode = Encode::new(encoding::PORT);

/// Parses `input` into `b`, resolving against `base` when one is given.
/// On success the builder's scheme and host are set.
pub(crate) fn parse(b: &mut Builder, base: Option<&WebUrl>, input: &str) -> Result<(), ParseError> {
    let input = trim_ascii_whitespace(input);
    let bytes = input.as_bytes();
    let limit = bytes.len();
    let mut pos = 0;

    // Scheme.
    let scheme = match scheme_delimiter_offset(bytes) {
        Some(colon) => {
            if starts_with_ignore_case(bytes, b"https:") {
                pos += "https:".len();
                Scheme::Https
            } else if starts_with_ignore_case(bytes, b"http:") {
                pos += "http:".len();
                Scheme::Http
            } else {
                return Err(ParseError::unsupported_scheme(Some(input[..colon].to_owned())));
            }
        }
        None => match base {
            Some(base) => base.scheme(),
            None => return Err(ParseError::unsupported_scheme(None)),
        },
    };
    b.scheme = Some(scheme);

    // Authority. Both `/` and `\` announce one; any run of two or more (or
    // any run at all without a same-scheme base to inherit from) does.
    let slash_count = bytes[pos..]
        .iter()
        .take_while(|&&x| x == b'/' || x == b'\\')
        .count();

    match base {
        Some(base) if slash_count < 2 && base.scheme() == scheme => {
            // A relative reference: keep the base's authority and path.
            b.username = base.encoded_username().to_owned();
            b.password = base.encoded_password().to_owned();
            b.host = Some(base.host().to_owned());
            b.port = Some(base.port());
            b.path_segments = base.encoded_path_segments().to_vec();
            if pos == limit || bytes[pos] == b'#' {
                // No path and no query either: the base's query carries over.
                b.query = base.query_pairs().map(<[_]>::to_vec);
            }
        }
        _ => {
            pos += slash_count;
            let mut has_username = false;
            let mut has_password = false;
            loop {
                let component_end = delimiter_offset(bytes, pos, limit, b"@/\\?#");
                match bytes.get(component_end).copied() {
                    Some(b'@') => {
                        // Userinfo precedes. The *last* `@` is the delimiter;
                        // earlier ones are encoded into the username, or into
                        // the password once the first `:` has been seen.
                        if has_password {
                            let piece = PASSWORD.apply(&input[pos..component_end]);
                            b.password = format!("{}%40{}", b.password, piece);
                        } else {
                            let colon = delimiter_offset(bytes, pos, component_end, b":");
                            let username = USERNAME.apply(&input[pos..colon]);
                            b.username = if has_username {
                                format!("{}%40{}", b.username, username)
                            } else {
                                username.into_owned()
                            };
                            if colon != component_end {
                                has_password = true;
                                b.password =
                                    PASSWORD.apply(&input[colon + 1..component_end]).into_owned();
                            }
                            has_username = true;
                        }
                        pos = component_end + 1;
                    }
                    _ => {
                        // Host and optional port precede.
                        let port_colon = port_colon_offset(bytes, pos, component_end);
                        if port_colon + 1 < component_end {
                            let raw = &input[port_colon + 1..component_end];
                            b.port =
                                Some(parse_port(raw).ok_or_else(|| ParseError::invalid_port(raw))?);
                        } else {
                            // No port, or an empty one, which counts as absent.
                            b.port = None;
                        }
                        let raw = &input[pos..port_colon];
                        b.host = Some(
                            host::canonicalize(raw).ok_or_else(|| ParseError::invalid_host(raw))?,
                        );
                        pos = component_end;
                        break;
                    }
                }
            }
        }
    }

    // Path.
    let path_end = delimiter_offset(bytes, pos, limit, b"?#");
    resolve_path(b, input, pos, path_end);
    pos = path_end;

    // Query.
    if pos < limit && bytes[pos] == b'?' {
        let query_end = delimiter_offset(bytes, pos, limit, b"#");
        let canonical = QUERY.apply(&input[pos + 1..query_end]);
        b.query = Some(parse_pairs(&canonical));
        pos = query_end;
    }

    // Fragment.
    if pos < limit && bytes[pos] == b'#' {
        b.fragment = Some(FRAGMENT.apply(&input[pos + 1..limit]).into_owned());
    }

    Ok(())
}

/// Canonicalizes `input[pos..limit]` as a path into the builder's segment
/// list. An empty slice keeps the list as it is; a leading `/` or `\` resets
/// it to the root; anything else continues from the list's last segment.
pub(crate) fn resolve_path(b: &mut Builder, input: &str, mut pos: usize, limit: usize) {
    if pos == limit {
        return;
    }
    let bytes = input.as_bytes();
    if bytes[pos] == b'/' || bytes[pos] == b'\\' {
        b.path_segments.clear();
        b.path_segments.push(String::new());
        pos += 1;
    } else {
        let last = b.path_segments.len() - 1;
        b.path_segments[last] = String::new();
    }

    let mut i = pos;
    while i < limit {
        let segment_end = delimiter_offset(bytes, i, limit, b"/\\");
        let has_trailing_slash = segment_end < limit;
        let segment = PATH_SEGMENT.apply(&input[i..segment_end]);
        path::push(&mut b.path_segments, &segment, has_trailing_slash);
        i = segment_end;
        if has_trailing_slash {
            i += 1;
        }
    }
}

/// Trims the ASCII whitespace a URL may legitimately be wrapped in.
fn trim_ascii_whitespace(input: &str) -> &str {
    input.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\x0c' | '\r'))
}

/// Finds the `:` ending a scheme prefix of the well-formed shape
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, if the input has one.
fn scheme_delimiter_offset(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() {
        return None;
    }
    for (i, &x) in bytes.iter().enumerate().skip(1) {
        match x {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'+' | b'-' | b'.' => {}
            b':' => return Some(i),
            _ => return None,
        }
    }
    None
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Returns the index of the first of `delimiters` in `bytes[pos..limit]`,
/// or `limit`. Delimiters are ASCII, so byte scanning is UTF-8 safe.
pub(crate) fn delimiter_offset(bytes: &[u8], pos: usize, limit: usize, delimiters: &[u8]) -> usize {
    bytes[pos..limit]
        .iter()
        .position(|x| delimiters.contains(x))
        .map_or(limit, |i| pos + i)
}

/// Finds the `:` introducing a port within `bytes[pos..limit]`, skipping
/// the colons inside an IPv6 literal's square brackets.
fn port_colon_offset(bytes: &[u8], pos: usize, limit: usize) -> usize {
    let mut i = pos;
    while i < limit {
        match bytes[i] {
            b'[' => {
                i += 1;
                while i < limit && bytes[i] != b']' {
                    i += 1;
                }
            }
            b':' => return i,
            _ => {}
        }
        i += 1;
    }
    limit
}

/// Reads a decimal port in `1..=65535`. Leading zeros are tolerated;
/// percent-encoded digits are not.
fn parse_port(raw: &str) -> Option<u16> {
    let canonical = PORT.apply(raw);
    let port: u16 = canonical.parse().ok()?;
    (port != 0).then_some(port)
}
