//! Path-segment list operations, including dot-segment resolution.
//!
//! A path is an ordered list of encoded segments with an implicit `/` before
//! each element: the root path `/` is the single empty segment, and a path
//! with a trailing slash ends in an empty segment. The list never empties.

/// A `.` segment, in any encoding the resolver must recognize.
pub(crate) fn is_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

/// A `..` segment, in any encoding the resolver must recognize.
pub(crate) fn is_dot_dot(segment: &str) -> bool {
    segment == ".."
        || segment.eq_ignore_ascii_case("%2e.")
        || segment.eq_ignore_ascii_case(".%2e")
        || segment.eq_ignore_ascii_case("%2e%2e")
}

/// Appends one canonical segment, resolving dot segments as they arrive.
///
/// A `.` is dropped; a `..` pops. Otherwise the segment lands either in the
/// empty slot left by a trailing slash or in a fresh slot, and
/// `add_trailing_slash` leaves a new empty slot after it.
pub(crate) fn push(segments: &mut Vec<String>, segment: &str, add_trailing_slash: bool) {
    if is_dot(segment) {
        return;
    }
    if is_dot_dot(segment) {
        pop(segments);
        return;
    }

    let last = segments.len() - 1;
    if segments[last].is_empty() {
        segments[last] = segment.to_owned();
    } else {
        segments.push(segment.to_owned());
    }
    if add_trailing_slash {
        segments.push(String::new());
    }
}

/// Removes the segment a `..` refers to, keeping the path ending in a slash.
///
/// Popping an empty terminal segment (a trailing slash) removes the segment
/// before it; popping a named segment leaves an empty one in its place. At
/// the root there is nothing to consume and the single empty segment stays.
pub(crate) fn pop(segments: &mut Vec<String>) {
    let removed = segments.pop().unwrap_or_default();
    if removed.is_empty() && !segments.is_empty() {
        if let Some(last) = segments.last_mut() {
            last.clear();
        }
    } else {
        segments.push(String::new());
    }
}
