//! The query model: an ordered list of `(name, value)` pairs.
//!
//! A raw query splits on `&`, then each piece splits at its first `=`. A
//! piece without `=` has an absent value, which is distinct from an empty
//! one. Order and duplicates are preserved, so joining the pairs back with
//! `&` and `=` reproduces the raw query byte for byte.

use core::fmt;

/// An encoded query name paired with its optional encoded value.
pub(crate) type Pair = (String, Option<String>);

/// Splits an encoded query string into pairs. The empty string is one pair
/// with an empty name and no value.
pub(crate) fn parse_pairs(encoded_query: &str) -> Vec<Pair> {
    let bytes = encoded_query.as_bytes();
    let mut result = Vec::new();
    let mut pos = 0;
    loop {
        let ampersand = bytes[pos..]
            .iter()
            .position(|&x| x == b'&')
            .map_or(bytes.len(), |i| pos + i);
        let piece = &encoded_query[pos..ampersand];
        match piece.split_once('=') {
            Some((name, value)) => result.push((name.to_owned(), Some(value.to_owned()))),
            None => result.push((piece.to_owned(), None)),
        }
        if ampersand == bytes.len() {
            return result;
        }
        pos = ampersand + 1;
    }
}

/// Joins pairs back into a query string.
pub(crate) fn write_pairs<W: fmt::Write>(out: &mut W, pairs: &[Pair]) -> fmt::Result {
    for (i, (name, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.write_char('&')?;
        }
        out.write_str(name)?;
        if let Some(value) = value {
            out.write_char('=')?;
            out.write_str(value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(raw: &str) -> String {
        let mut out = String::new();
        write_pairs(&mut out, &parse_pairs(raw)).unwrap();
        out
    }

    #[test]
    fn splits_at_first_equals() {
        assert_eq!(
            parse_pairs("a=b=c"),
            [("a".to_owned(), Some("b=c".to_owned()))]
        );
    }

    #[test]
    fn absent_and_empty_values_differ() {
        assert_eq!(parse_pairs("a"), [("a".to_owned(), None)]);
        assert_eq!(parse_pairs("a="), [("a".to_owned(), Some(String::new()))]);
    }

    #[test]
    fn empty_query_is_one_empty_pair() {
        assert_eq!(parse_pairs(""), [(String::new(), None)]);
    }

    #[test]
    fn single_ampersand_is_two_empty_pairs() {
        assert_eq!(
            parse_pairs("&"),
            [(String::new(), None), (String::new(), None)]
        );
    }

    #[test]
    fn joining_is_the_inverse_of_splitting() {
        for raw in ["", "&", "a", "a=", "a=b", "a=b&c", "x=1&x=2&x=3", "=&=="] {
            assert_eq!(roundtrip(raw), raw);
        }
    }
}
