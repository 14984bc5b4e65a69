//! Exclusion filters applied while a lineage tree is being built.
//!
//! Each filter is an optional whole-name pattern. A super-type or interface
//! whose name matches is pruned together with everything behind it in that
//! branch; it is not replaced by a placeholder. Filters only act during
//! construction and never touch a tree that already exists.

use crate::diagnostics::LineageError;
use regex::Regex;
use std::fmt;

/// A regular expression that must match an entire type name.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile `pattern`. The pattern is anchored at both ends, so
    /// `.*List` matches `java.util.List` but `List` alone does not.
    pub fn new(pattern: &str) -> Result<Self, LineageError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            LineageError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written by the caller, before anchoring.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.source).finish()
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

/// Which part of a hierarchy a filter prunes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Super-types, matched on their raw name.
    Class,
    /// Declared type parameters, matched on their resolved name.
    ClassParam,
    /// Implemented interfaces.
    Interface,
    /// Type arguments of parameterized interfaces and super-types.
    InterfaceParam,
}

/// Four independent, optional name filters. The default filters nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionFilters {
    class: Option<NamePattern>,
    class_param: Option<NamePattern>,
    interface: Option<NamePattern>,
    interface_param: Option<NamePattern>,
}

impl ExclusionFilters {
    /// Filters that exclude nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Compile all four filters from optional pattern strings.
    pub fn from_patterns(
        class: Option<&str>,
        class_param: Option<&str>,
        interface: Option<&str>,
        interface_param: Option<&str>,
    ) -> Result<Self, LineageError> {
        Ok(Self {
            class: class.map(NamePattern::new).transpose()?,
            class_param: class_param.map(NamePattern::new).transpose()?,
            interface: interface.map(NamePattern::new).transpose()?,
            interface_param: interface_param.map(NamePattern::new).transpose()?,
        })
    }

    pub fn with_class_filter(mut self, pattern: NamePattern) -> Self {
        self.class = Some(pattern);
        self
    }

    pub fn with_class_param_filter(mut self, pattern: NamePattern) -> Self {
        self.class_param = Some(pattern);
        self
    }

    pub fn with_interface_filter(mut self, pattern: NamePattern) -> Self {
        self.interface = Some(pattern);
        self
    }

    pub fn with_interface_param_filter(mut self, pattern: NamePattern) -> Self {
        self.interface_param = Some(pattern);
        self
    }

    /// The pattern configured for `kind`, if any.
    pub fn get(&self, kind: FilterKind) -> Option<&NamePattern> {
        match kind {
            FilterKind::Class => self.class.as_ref(),
            FilterKind::ClassParam => self.class_param.as_ref(),
            FilterKind::Interface => self.interface.as_ref(),
            FilterKind::InterfaceParam => self.interface_param.as_ref(),
        }
    }

    /// Whether `name` is pruned by the filter of the given kind.
    #[inline]
    pub fn excludes(&self, kind: FilterKind, name: &str) -> bool {
        self.get(kind).is_some_and(|pattern| pattern.matches(name))
    }

    /// Whether no filter is configured.
    pub fn is_empty(&self) -> bool {
        self.class.is_none()
            && self.class_param.is_none()
            && self.interface.is_none()
            && self.interface_param.is_none()
    }
}
