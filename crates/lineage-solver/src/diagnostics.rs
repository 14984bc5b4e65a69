//! Error types for the solver.
//!
//! Only comparison fails in the normal course of things: a structural
//! mismatch is reported as [`TypeMismatchError`]. Parsing a hierarchy never
//! fails; unresolvable names degrade to the wildcard sentinel instead.
//! [`LineageError`] gathers the remaining caller-facing failures (absent
//! required arguments, bad filter patterns, malformed signatures).

use crate::node::TypeNode;
use thiserror::Error;

/// Two lineage trees do not describe compatible shapes.
///
/// Carries both names and a message detailed enough to diagnose the
/// mismatch without re-running the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeMismatchError {
    source_type: String,
    target_type: Option<String>,
    message: String,
}

impl TypeMismatchError {
    /// Two non-wildcard nodes with different names.
    pub fn names_differ(source: &str, target: &str) -> Self {
        Self {
            source_type: source.to_string(),
            target_type: Some(target.to_string()),
            message: format!("Source type '{source}' does not match target type '{target}'"),
        }
    }

    /// Two equally named nodes with different child counts.
    ///
    /// The message lists the names of both sides' children.
    pub fn child_counts_differ(source: &TypeNode, target: &TypeNode) -> Self {
        let mut message = format!("Source type '{}' has ", source.name());
        push_children(&mut message, source);
        message.push_str(&format!(" while '{}' has ", target.name()));
        push_children(&mut message, target);

        Self {
            source_type: source.name().to_string(),
            target_type: Some(target.name().to_string()),
            message,
        }
    }

    /// Comparison against an absent target.
    pub fn missing_target(source: &str) -> Self {
        Self {
            source_type: source.to_string(),
            target_type: None,
            message: format!("Source type '{source}' cannot be compared to an absent target type"),
        }
    }

    /// Trees nested deeper than the comparator is willing to descend.
    pub fn nesting_too_deep(source: &str, target: &str, max_depth: u32) -> Self {
        Self {
            source_type: source.to_string(),
            target_type: Some(target.to_string()),
            message: format!(
                "Comparison of '{source}' and '{target}' exceeded the maximum nesting depth \
                 of {max_depth}"
            ),
        }
    }

    /// Name of the source node where the mismatch was found.
    pub fn source_name(&self) -> &str {
        &self.source_type
    }

    /// Name of the target node where the mismatch was found, `None` when
    /// the target itself was absent.
    pub fn target_name(&self) -> Option<&str> {
        self.target_type.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// `N subTypes (a, b, c)`; the list is left out when there are no children.
fn push_children(message: &mut String, node: &TypeNode) {
    let children = node.children();
    message.push_str(&format!("{} subTypes", children.len()));
    if !children.is_empty() {
        let names: Vec<&str> = children.iter().map(TypeNode::name).collect();
        message.push_str(&format!(" ({})", names.join(", ")));
    }
}

/// Malformed textual generic signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("unexpected end of signature at offset {position}")]
    UnexpectedEnd { position: usize },

    #[error("unexpected character '{found}' at offset {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("empty type argument at offset {position}")]
    EmptyArgument { position: usize },

    #[error("trailing input at offset {position}")]
    TrailingInput { position: usize },

    #[error("type arguments nested too deeply at offset {position}")]
    TooDeep { position: usize },
}

impl SignatureError {
    /// Byte offset into the signature where the problem was found.
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedEnd { position }
            | Self::UnexpectedChar { position, .. }
            | Self::EmptyArgument { position }
            | Self::TrailingInput { position }
            | Self::TooDeep { position } => *position,
        }
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error(transparent)]
    Mismatch(#[from] TypeMismatchError),

    /// A required argument was absent.
    #[error("required argument `{argument}` was not provided")]
    Precondition { argument: &'static str },

    #[error("invalid name pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid signature: {0}")]
    Signature(#[from] SignatureError),
}

impl LineageError {
    pub fn precondition(argument: &'static str) -> Self {
        Self::Precondition { argument }
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
