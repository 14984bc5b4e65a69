//! Parser for textual generic signatures.
//!
//! Accepts the text form produced by [`TypeNode::render`] as well as
//! ordinary source spellings:
//!
//! ```text
//! signature := type
//! type      := wildcard | name ( '<' type ( ',' type )* '>' )?
//! wildcard  := '?' ( ( "extends" | "super" ) type )?
//! ```
//!
//! Whitespace between tokens is ignored. Qualified names are kept verbatim
//! and are not checked against any oracle. Wildcards (bounded or not) and
//! placeholder names (`T`, `List`, `int[]`) become the wildcard sentinel;
//! their type arguments are still checked for syntax but dropped.

use crate::diagnostics::SignatureError;
use crate::node::TypeNode;
use crate::recursion::{DepthCounter, RecursionProfile};
use lineage_common::limits::{STACK_GROWTH, STACK_RED_ZONE};
use lineage_common::names::is_placeholder_name;
use lineage_common::TOP_TYPE_NAME;

/// Parse `text` into a lineage tree.
pub fn parse_signature(text: &str) -> Result<TypeNode, SignatureError> {
    let mut parser = SignatureParser {
        text,
        pos: 0,
        depth: DepthCounter::with_profile(RecursionProfile::SignatureParse),
    };
    let node = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.pos < text.len() {
        return Err(SignatureError::TrailingInput { position: parser.pos });
    }
    Ok(node)
}

struct SignatureParser<'s> {
    text: &'s str,
    pos: usize,
    depth: DepthCounter,
}

#[inline]
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | ',')
}

impl<'s> SignatureParser<'s> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// The next run of non-delimiter characters; may be empty.
    fn token(&mut self) -> &'s str {
        let text = self.text;
        let rest = &text[self.pos..];
        let len = rest.find(is_delimiter).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn parse_type(&mut self) -> Result<TypeNode, SignatureError> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.token();
        if name.is_empty() {
            return Err(match self.peek() {
                Some(found) => SignatureError::UnexpectedChar { found, position: start },
                None => SignatureError::UnexpectedEnd { position: start },
            });
        }

        if name == TOP_TYPE_NAME {
            self.parse_wildcard_bound()?;
            return Ok(TypeNode::top());
        }

        self.skip_whitespace();
        let args = if self.peek() == Some('<') {
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        if is_placeholder_name(name) {
            return Ok(TypeNode::top());
        }
        Ok(TypeNode::with_children(name, args))
    }

    /// Optional `extends X` / `super X` after a `?`.
    fn parse_wildcard_bound(&mut self) -> Result<(), SignatureError> {
        self.skip_whitespace();
        let checkpoint = self.pos;
        match self.token() {
            "extends" | "super" => self.parse_type().map(drop),
            _ => {
                self.pos = checkpoint;
                Ok(())
            }
        }
    }

    /// `'<' type (',' type)* '>'`, positioned on the `<`.
    fn parse_arguments(&mut self) -> Result<Vec<TypeNode>, SignatureError> {
        let open = self.pos;
        if !self.depth.enter() {
            return Err(SignatureError::TooDeep { position: open });
        }
        let result =
            stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.parse_argument_list());
        self.depth.leave();
        result
    }

    fn parse_argument_list(&mut self) -> Result<Vec<TypeNode>, SignatureError> {
        self.eat('<');
        let mut args = Vec::new();
        loop {
            self.skip_whitespace();
            if matches!(self.peek(), Some(',' | '>')) {
                return Err(SignatureError::EmptyArgument { position: self.pos });
            }
            args.push(self.parse_type()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.eat(',');
                }
                Some('>') => {
                    self.eat('>');
                    return Ok(args);
                }
                Some(found) => {
                    return Err(SignatureError::UnexpectedChar { found, position: self.pos });
                }
                None => return Err(SignatureError::UnexpectedEnd { position: self.pos }),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/signature_tests.rs"]
mod tests;
