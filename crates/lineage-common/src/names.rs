//! Reserved type names and the rules used to classify raw type names.
//!
//! A lineage tree only ever stores names. Two names are reserved:
//!
//! - [`TOP_TYPE_NAME`]: the wildcard sentinel standing for any type that is
//!   unknown, erased, or generic. Comparison treats it as matching anything.
//! - [`NULL_TYPE_NAME`]: the type of an absent value.
//!
//! Everything else is a canonical name handed out by a type oracle.

/// Sentinel name for unknown / erased / generic types.
pub const TOP_TYPE_NAME: &str = "?";

/// Name of the node produced for an absent value.
pub const NULL_TYPE_NAME: &str = "null";

/// Separator between namespace segments of a qualified name.
pub const NAMESPACE_SEPARATOR: char = '.';

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

#[inline]
fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Returns `true` if `segment` is a single identifier.
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Returns `true` if `name` is one or more identifiers joined by
/// [`NAMESPACE_SEPARATOR`] (`Foo`, `java.util.List`, `a.b$Inner`).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.split(NAMESPACE_SEPARATOR).all(is_identifier)
}

/// Returns `true` if `name` is a valid name carrying a namespace.
pub fn is_qualified_name(name: &str) -> bool {
    is_valid_name(name) && name.contains(NAMESPACE_SEPARATOR)
}

/// Returns `true` if `name` must be treated as an unresolved type parameter.
///
/// Any unqualified bare identifier (`T`, `E`, `Key`, `Element`) is presumed
/// to be a placeholder, as is anything that is not a valid name at all
/// (`?`, `? extends Foo`, `T[]`).
pub fn is_placeholder_name(name: &str) -> bool {
    !is_qualified_name(name)
}

/// Returns `true` if `name` is the wildcard sentinel.
#[inline]
pub fn is_top_name(name: &str) -> bool {
    name == TOP_TYPE_NAME
}

/// Last namespace segment of `name` (`java.util.List` -> `List`).
pub fn simple_name(name: &str) -> &str {
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("T"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("Outer$Inner"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn valid_names() {
        assert!(is_valid_name("java.util.List"));
        assert!(is_valid_name("Foo"));
        assert!(!is_valid_name("java..List"));
        assert!(!is_valid_name(".List"));
        assert!(!is_valid_name("List."));
        assert!(!is_valid_name("?"));
        assert!(!is_valid_name("T[]"));
    }

    #[test]
    fn placeholders_are_bare_or_invalid() {
        assert!(is_placeholder_name("T"));
        assert!(is_placeholder_name("Element"));
        assert!(is_placeholder_name("?"));
        assert!(is_placeholder_name("? extends java.lang.Number"));
        assert!(!is_placeholder_name("java.lang.String"));
        assert!(!is_placeholder_name("com.example.Outer$Inner"));
    }

    #[test]
    fn top_sentinel_is_a_placeholder() {
        assert!(is_top_name(TOP_TYPE_NAME));
        assert!(is_placeholder_name(TOP_TYPE_NAME));
        assert!(!is_top_name(NULL_TYPE_NAME));
    }

    #[test]
    fn simple_names() {
        assert_eq!(simple_name("java.util.List"), "List");
        assert_eq!(simple_name("List"), "List");
    }
}
