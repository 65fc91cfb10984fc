//! Percent-encoding utilities.
//!
//! Each URL component owns an [`EncodeSet`] naming the ASCII characters that
//! must leave a component percent-encoded. Control characters are always
//! encoded; non-ASCII characters are encoded unless a component allows them
//! through (the fragment does). The per-call switches live on [`Encode`].

use std::borrow::Cow;

/// A 128-bit bitmap over ASCII naming the characters that must be
/// percent-encoded within one component.
#[derive(Clone, Copy)]
pub(crate) struct EncodeSet(u128);

impl EncodeSet {
    /// Creates a set containing exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics at compile time if any byte is not ASCII.
    pub(crate) const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot put a non-ASCII byte in an encode set");
            table |= 1 << *cur;
            bytes = rem;
        }
        Self(table)
    }

    pub(crate) const fn contains(self, x: u8) -> bool {
        x < 0x80 && self.0 >> x & 1 != 0
    }
}

/// `user` and `password` share one set; the parser splits userinfo at the
/// first `:` before either side is encoded.
pub(crate) const USERINFO: EncodeSet = EncodeSet::new(b" \"':;<=>@[]^`{}|/\\?#");

pub(crate) const PATH_SEGMENT: EncodeSet = EncodeSet::new(b" \"<>^`{}|/\\?#");

/// A query taken as one raw string.
pub(crate) const QUERY: EncodeSet = EncodeSet::new(b" \"'<>#");

/// A single query name or value given in decoded form.
pub(crate) const QUERY_COMPONENT: EncodeSet = EncodeSet::new(b" !\"#$&'(),/:;<=>?@[]\\^`{|}~");

/// A single query name or value given in encoded form. Only the characters
/// that would corrupt the pair structure are re-encoded.
pub(crate) const QUERY_COMPONENT_REENCODE: EncodeSet = EncodeSet::new(b" \"'<>#&=");

pub(crate) const FRAGMENT: EncodeSet = EncodeSet::new(b"");

// Additional characters a generic URI representation cannot carry literally.
pub(crate) const PATH_SEGMENT_URI: EncodeSet = EncodeSet::new(b"[]");
pub(crate) const QUERY_COMPONENT_URI: EncodeSet = EncodeSet::new(b"\\^`{|}");
pub(crate) const FRAGMENT_URI: EncodeSet = EncodeSet::new(b" \"#<>\\^`{|}");

/// Used when scanning a port: any stray `%` becomes `%25` and poisons the
/// number, failing the port parse.
pub(crate) const PORT: EncodeSet = EncodeSet::new(b"");

/// One percent-encoding pass: an encode set plus the switches that vary
/// between call sites of the same component.
#[derive(Clone, Copy)]
pub(crate) struct Encode {
    set: EncodeSet,
    /// Input is already in encoded form: well-formed `%HH` triplets pass
    /// through verbatim, `+` survives under `plus_is_space`, and interior
    /// `\t`, `\n`, `\x0c`, `\r` are dropped.
    already_encoded: bool,
    /// Re-encode any `%` that does not begin a well-formed triplet.
    strict: bool,
    /// `+` carries space semantics (query components only).
    plus_is_space: bool,
    /// Percent-encode non-ASCII code points. Cleared for fragments.
    ascii_only: bool,
}

impl Encode {
    pub(crate) const fn new(set: EncodeSet) -> Self {
        Self {
            set,
            already_encoded: false,
            strict: false,
            plus_is_space: false,
            ascii_only: true,
        }
    }

    pub(crate) const fn already_encoded(mut self) -> Self {
        self.already_encoded = true;
        self
    }

    pub(crate) const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub(crate) const fn plus_is_space(mut self) -> Self {
        self.plus_is_space = true;
        self
    }

    pub(crate) const fn unicode_allowed(mut self) -> Self {
        self.ascii_only = false;
        self
    }

    /// Canonicalizes `input`, borrowing it when no character needs work.
    pub(crate) fn apply<'a>(self, input: &'a str) -> Cow<'a, str> {
        for (i, c) in input.char_indices() {
            if self.must_escape(input, i, c) {
                let mut out = String::with_capacity(input.len() + 16);
                out.push_str(&input[..i]);
                self.apply_slow(&input[i..], &mut out);
                return Cow::Owned(out);
            }
        }
        Cow::Borrowed(input)
    }

    /// Whether the character at byte index `i` takes the slow path. This
    /// intentionally also matches `+` under `plus_is_space` and encoded-input
    /// whitespace, whose fate is decided in [`apply_slow`](Self::apply_slow).
    fn must_escape(self, input: &str, i: usize, c: char) -> bool {
        if c < '\u{20}' || c == '\u{7f}' {
            return true;
        }
        if !c.is_ascii() {
            return self.ascii_only;
        }
        let x = c as u8;
        self.set.contains(x)
            || x == b'%'
                && (!self.already_encoded
                    || self.strict && !is_pct_encoded(input.as_bytes(), i))
            || x == b'+' && self.plus_is_space
    }

    fn apply_slow(self, input: &str, out: &mut String) {
        for (i, c) in input.char_indices() {
            if self.already_encoded && matches!(c, '\t' | '\n' | '\x0c' | '\r') {
                // Interior whitespace in encoded input is dropped, like the
                // whitespace the parser trims from the ends.
            } else if c == '+' && self.plus_is_space {
                out.push_str(if self.already_encoded { "+" } else { "%2B" });
            } else if self.must_escape(input, i, c) {
                let mut buf = [0; 4];
                for &x in c.encode_utf8(&mut buf).as_bytes() {
                    push_pct(out, x);
                }
            } else {
                out.push(c);
            }
        }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

fn push_pct(out: &mut String, x: u8) {
    out.push('%');
    out.push(HEX_DIGITS[(x >> 4) as usize] as char);
    out.push(HEX_DIGITS[(x & 0xf) as usize] as char);
}

/// Checks for a well-formed `%HH` triplet at byte index `i`.
fn is_pct_encoded(bytes: &[u8], i: usize) -> bool {
    i + 2 < bytes.len()
        && bytes[i] == b'%'
        && hex_digit(bytes[i + 1]).is_some()
        && hex_digit(bytes[i + 2]).is_some()
}

pub(crate) fn hex_digit(x: u8) -> Option<u8> {
    match x {
        b'0'..=b'9' => Some(x - b'0'),
        b'a'..=b'f' => Some(x - b'a' + 10),
        b'A'..=b'F' => Some(x - b'A' + 10),
        _ => None,
    }
}

/// Decodes `%HH` triplets (and `+` to space when `plus_is_space`), borrowing
/// the input when there is nothing to decode. A `%` that does not begin a
/// well-formed triplet is a literal. The decoded bytes are read as UTF-8;
/// each ill-formed maximal subpart becomes U+FFFD.
pub(crate) fn percent_decode(encoded: &str, plus_is_space: bool) -> Cow<'_, str> {
    let bytes = encoded.as_bytes();
    let Some(first) = bytes
        .iter()
        .position(|&x| x == b'%' || x == b'+' && plus_is_space)
    else {
        return Cow::Borrowed(encoded);
    };

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..first]);
    let mut i = first;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                    continue;
                }
                out.push(b'%');
                i += 1;
            }
            b'+' if plus_is_space => {
                out.push(b' ');
                i += 1;
            }
            x => {
                out.push(x);
                i += 1;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(&e.into_bytes()).into_owned()),
    }
}
