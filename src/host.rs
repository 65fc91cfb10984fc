//! Host canonicalization: IDN names, IPv6 literals and dotted-quad IPv4.

use crate::encoding::{hex_digit, percent_decode};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Canonicalizes the raw host slice of an authority, or returns `None` if it
/// cannot name a host.
///
/// The slice is percent-decoded first, so both the contents of an IPv6
/// literal and its square brackets may arrive encoded. A decoded form
/// containing `:` is an IPv6 literal; everything else is mapped through
/// IDNA ToASCII, with anything shaped like a dotted-quad IPv4 address held
/// to the strict form.
pub(crate) fn canonicalize(raw: &str) -> Option<String> {
    let host = percent_decode(raw, false);

    if host.contains(':') {
        let inner = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&host);
        let addr = parse_v6(inner.as_bytes())?;
        return Some(match addr.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            // `std`'s `Display` is the RFC 5952 form: lowercase hex, minimal
            // zeros, the first longest run of two or more zero groups elided.
            None => addr.to_string(),
        });
    }

    let result = idna::domain_to_ascii(&host).ok()?;
    let result = result.to_ascii_lowercase();
    if result.is_empty() || result.bytes().any(is_forbidden_in_hostname) {
        return None;
    }
    if result.bytes().all(|x| x.is_ascii_digit() || x == b'.') {
        // Shaped like an IPv4 address, so it must be one.
        return parse_v4(result.as_bytes()).map(|addr| addr.to_string());
    }
    Some(result)
}

/// The ASCII characters that never appear in a canonical host name.
fn is_forbidden_in_hostname(x: u8) -> bool {
    x <= 0x1f || x >= 0x7f || matches!(x, b' ' | b'#' | b'%' | b'/' | b':' | b'?' | b'@' | b'[' | b'\\' | b']')
}

/// Parses a strict dotted-quad IPv4 address: four decimal octets in `0..=255`
/// with no unnecessary leading zeros.
pub(crate) fn parse_v4(input: &[u8]) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    parse_v4_groups(input, &mut octets, 0)?;
    Some(Ipv4Addr::from(octets))
}

/// Parses dot-separated decimal octets from `input` into
/// `address[offset..]`, which they must fill exactly.
fn parse_v4_groups(input: &[u8], address: &mut [u8], offset: usize) -> Option<()> {
    let mut b = offset;
    let mut i = 0;
    while i < input.len() {
        if b == address.len() {
            return None; // Too many groups.
        }

        if b != offset {
            if input[i] != b'.' {
                return None; // Wrong delimiter.
            }
            i += 1;
        }

        // Read one or more decimal digits, rejecting unnecessary leading zeros.
        let mut value: u32 = 0;
        let group_start = i;
        while i < input.len() && input[i].is_ascii_digit() {
            if value == 0 && i != group_start {
                return None;
            }
            value = value * 10 + u32::from(input[i] - b'0');
            if value > 255 {
                return None;
            }
            i += 1;
        }
        if i == group_start {
            return None; // Empty group.
        }

        address[b] = value as u8;
        b += 1;
    }
    (b == address.len()).then_some(())
}

/// Parses an IPv6 address: one to eight groups of one to four hex digits,
/// at most one `::` compression, and an optional trailing dotted-quad IPv4
/// suffix contributing the last four bytes.
pub(crate) fn parse_v6(input: &[u8]) -> Option<Ipv6Addr> {
    let mut address = [0u8; 16];
    let mut b = 0;
    let mut compress = usize::MAX;
    let mut group_start = usize::MAX;

    let mut i = 0;
    while i < input.len() {
        if b == address.len() {
            return None; // Too many groups.
        }

        // Read a delimiter.
        if input[i..].starts_with(b"::") {
            if compress != usize::MAX {
                return None; // Multiple "::" delimiters.
            }
            i += 2;
            b += 2;
            compress = b;
            if i == input.len() {
                break;
            }
        } else if b != 0 {
            match input[i] {
                b':' => i += 1,
                b'.' => {
                    // Rewind to the start of the previous group and read it
                    // again as the first octet of an IPv4 suffix. The group's
                    // two bytes are replaced by the suffix's four.
                    parse_v4_groups(&input[group_start..], &mut address, b - 2)?;
                    b += 2;
                    break;
                }
                _ => return None, // Wrong delimiter.
            }
        }

        // Read a group of one to four hex digits.
        let mut value: u32 = 0;
        group_start = i;
        while i < input.len() && i - group_start < 5 {
            match hex_digit(input[i]) {
                Some(digit) => {
                    value = value << 4 | u32::from(digit);
                    i += 1;
                }
                None => break,
            }
        }
        let group_len = i - group_start;
        if group_len == 0 || group_len > 4 {
            return None;
        }

        address[b] = (value >> 8) as u8;
        address[b + 1] = value as u8;
        b += 2;
    }

    if b != address.len() {
        if compress == usize::MAX {
            return None; // Not enough groups and nothing elided.
        }
        // Move the bytes after the "::" to the end of the address.
        let addr_len = address.len();
        address.copy_within(compress..b, addr_len - (b - compress));
        address[compress..compress + addr_len - b].fill(0);
    }

    Some(Ipv6Addr::from(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v4() {
        assert_eq!(Some(Ipv4Addr::new(127, 0, 0, 1)), parse_v4(b"127.0.0.1"));
        assert_eq!(
            Some(Ipv4Addr::new(255, 255, 255, 255)),
            parse_v4(b"255.255.255.255")
        );
        assert_eq!(Some(Ipv4Addr::new(0, 0, 0, 0)), parse_v4(b"0.0.0.0"));

        // out of range
        assert!(parse_v4(b"256.0.0.1").is_none());
        // too short
        assert!(parse_v4(b"255.0.0").is_none());
        // too long
        assert!(parse_v4(b"255.0.0.1.2").is_none());
        // no number between dots
        assert!(parse_v4(b"255.0..1").is_none());
        // leading zeros
        assert!(parse_v4(b"255.0.0.01").is_none());
        assert!(parse_v4(b"255.0.00.0").is_none());
        // preceding dot
        assert!(parse_v4(b".0.0.0.0").is_none());
        // trailing dot
        assert!(parse_v4(b"0.0.0.0.").is_none());
    }

    #[test]
    fn v6() {
        assert_eq!(
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)),
            parse_v6(b"0:0:0:0:0:0:0:0")
        );
        assert_eq!(
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8)),
            parse_v6(b"1:02:003:0004:0005:006:07:8")
        );

        assert_eq!(Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)), parse_v6(b"::1"));
        assert_eq!(Some(Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0)), parse_v6(b"1::"));
        assert_eq!(Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), parse_v6(b"::"));

        assert_eq!(
            Some(Ipv6Addr::new(0x2a02, 0x6b8, 0, 0, 0, 0, 0x11, 0x11)),
            parse_v6(b"2a02:6b8::11:11")
        );
        assert_eq!(
            Some(Ipv6Addr::new(0, 2, 3, 4, 5, 6, 7, 8)),
            parse_v6(b"::2:3:4:5:6:7:8")
        );
        assert_eq!(
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0)),
            parse_v6(b"1:2:3:4:5:6:7::")
        );

        // only a colon
        assert!(parse_v6(b":").is_none());
        // too long group
        assert!(parse_v6(b"::00000").is_none());
        // too short
        assert!(parse_v6(b"1:2:3:4:5:6:7").is_none());
        // too long
        assert!(parse_v6(b"1:2:3:4:5:6:7:8:9").is_none());
        // triple colon
        assert!(parse_v6(b"1:2:::6:7:8").is_none());
        assert!(parse_v6(b":::").is_none());
        // two double colons
        assert!(parse_v6(b"1:2::6::8").is_none());
        // "::" eliding nothing
        assert!(parse_v6(b"1:2:3:4::5:6:7:8").is_none());
        // preceding colon
        assert!(parse_v6(b":1:2:3:4:5:6:7:8").is_none());
        // trailing colon
        assert!(parse_v6(b"1:2:3:4:5:6:7:8:").is_none());
        // scope id
        assert!(parse_v6(b"::1%44").is_none());
    }

    #[test]
    fn v4_in_v6() {
        assert_eq!(
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0xc000, 0x221)),
            parse_v6(b"::192.0.2.33")
        );
        assert_eq!(
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x221)),
            parse_v6(b"::FFFF:192.0.2.33")
        );
        assert_eq!(
            Some(Ipv6Addr::new(0x64, 0xff9b, 0, 0, 0, 0, 0xc000, 0x221)),
            parse_v6(b"64:ff9b::192.0.2.33")
        );
        assert_eq!(
            Some(Ipv6Addr::new(
                0x2001, 0xdb8, 0x122, 0xc000, 0x2, 0x2100, 0xc000, 0x221
            )),
            parse_v6(b"2001:db8:122:c000:2:2100:192.0.2.33")
        );

        // colon after the suffix
        assert!(parse_v6(b"::127.0.0.1:").is_none());
        // not enough groups
        assert!(parse_v6(b"1:2:3:4:5:127.0.0.1").is_none());
        // too many groups
        assert!(parse_v6(b"1:2:3:4:5:6:7:127.0.0.1").is_none());
        // leading zeros in an octet
        assert!(parse_v6(b"0:0:0:0:0:1:0.0.0.01").is_none());
        // octet out of range
        assert!(parse_v6(b"0:0:0:0:0:1:256.0.0.1").is_none());
        // incomplete suffix
        assert!(parse_v6(b"0:0:0:0:0:1:255.255.255").is_none());
        assert!(parse_v6(b"0:0:0:0:0:1:255.255.255.").is_none());
    }

    #[test]
    fn canonical_hosts() {
        assert_eq!(canonicalize("example.com").as_deref(), Some("example.com"));
        assert_eq!(canonicalize("EXAMPLE.com").as_deref(), Some("example.com"));
        assert_eq!(canonicalize("10.0.0.1").as_deref(), Some("10.0.0.1"));
        assert_eq!(canonicalize("[::1]").as_deref(), Some("::1"));
        assert_eq!(canonicalize("::1").as_deref(), Some("::1"));
        assert_eq!(canonicalize("").as_deref(), None);
        assert_eq!(canonicalize("host name").as_deref(), None);
        // Unbalanced brackets never parse.
        assert_eq!(canonicalize("[::1").as_deref(), None);
    }
}
