//! URI and header templates.
//!
//! Templates use flat `{name}` placeholders where `name` matches
//! `[A-Za-z0-9_]+`. There is no nesting and no expression syntax.
//!
//! Expansion is a three step affair:
//!
//! 1. every `{` inside a bound value is replaced by `%7B`, so a value can never
//!    be mistaken for a placeholder when the result is expanded again;
//! 2. values are percent-encoded for their position (path segment, query
//!    component or header), keeping existing `%XX` sequences as they are;
//! 3. [`unescape_braces`] turns `%7B<word>%7D` back into `{<word>}` and folds
//!    a double-encoded `%257B` into `%7B`.
//!
//! Step 3 is a heuristic: a literal `{word}` written by the caller and an
//! encoded brace produced by an earlier encoding step look the same.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

use crate::error::{TemplateError, TemplateErrorKind};
use crate::Bindings;

/// Path segment encode set, `/` included.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// Path encode set used when slashes in values are kept.
const PATH: &AsciiSet = &PATH_SEGMENT.remove(b'/');

/// Query component encode set.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|')
    .add(b'%');

/// Header values and already-encoded variables only protect template syntax.
const TEMPLATE_SYNTAX: &AsciiSet = &CONTROLS.add(b'{').add(b'}');

static ESCAPED_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%7B([A-Za-z0-9_]+)%7D").expect("a valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Literal(String),
    Variable { name: String, in_query: bool },
}

/// A parsed `{name}` template.
///
/// # Example
///
/// ```
/// use stencil_core::Template;
///
/// let template: Template = "/users/{id}?expand={expand}".parse().expect("valid");
/// let names: Vec<_> = template.variables().collect();
/// assert_eq!(names, vec!["id", "expand"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    chunks: Vec<Chunk>,
}

impl Template {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Fails on an unclosed `{`, a stray `}` or a variable name outside
    /// `[A-Za-z0-9_]+`.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut chunks = Vec::new();
        let mut literal = String::new();
        let mut in_query = false;
        let mut chars = source.char_indices();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' => {
                    let start = position + 1;
                    let Some(len) = source.get(start..).and_then(|rest| rest.find('}')) else {
                        return Err(TemplateError::new(
                            source,
                            TemplateErrorKind::UnclosedBrace { position },
                        ));
                    };
                    let name = source.get(start..start + len).unwrap_or_default();
                    if !is_variable_name(name) {
                        return Err(TemplateError::new(
                            source,
                            TemplateErrorKind::InvalidVariable {
                                name: name.to_string(),
                            },
                        ));
                    }
                    if !literal.is_empty() {
                        chunks.push(Chunk::Literal(std::mem::take(&mut literal)));
                    }
                    chunks.push(Chunk::Variable {
                        name: name.to_string(),
                        in_query,
                    });
                    // names are ASCII: skip the name and the closing brace
                    chars.nth(len);
                }
                '}' => {
                    return Err(TemplateError::new(
                        source,
                        TemplateErrorKind::UnexpectedClosingBrace { position },
                    ));
                }
                '?' => {
                    in_query = true;
                    literal.push(c);
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            chunks.push(Chunk::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            chunks,
        })
    }

    /// The template source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Variable names, in order of appearance (duplicates included).
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Variable { name, .. } => Some(name.as_str()),
            Chunk::Literal(_) => None,
        })
    }

    /// Variable names found after the first `?`.
    pub fn query_variables(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Variable {
                name,
                in_query: true,
            } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Whether the template holds at least one placeholder.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        self.variables().next().is_some()
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_variable_byte)
}

const fn is_variable_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// The template variable standing for a parameter `name`.
///
/// Header names and query keys may hold characters a variable cannot, such
/// as `-`; each of those is replaced by `_`.
///
/// ```
/// use stencil_core::variable_name;
///
/// assert_eq!(variable_name("X-Request-Id"), "X_Request_Id");
/// assert_eq!(variable_name("page"), "page");
/// ```
#[must_use]
pub fn variable_name(name: &str) -> String {
    name.chars()
        .map(|c| if u8::try_from(c).is_ok_and(is_variable_byte) { c } else { '_' })
        .collect()
}

/// What a template is expanded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A URI: path variables are encoded as path segments, variables after
    /// the first `?` as query components.
    Uri {
        /// Keep `/` in path values instead of encoding it as `%2F`.
        decode_slash: bool,
    },
    /// A header value: only template syntax is protected.
    Header,
}

/// The result of expanding a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    text: String,
    placeholders: usize,
    rendered: usize,
}

impl Expansion {
    /// The expanded text, escape markers included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The expanded text, escape markers included.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// The expanded text with literal braces restored.
    #[must_use]
    pub fn unescape(self) -> String {
        unescape_braces(&self.text)
    }

    /// Whether the expansion carries nothing.
    ///
    /// That is the case when the text is empty, or when the template had
    /// placeholders and every one of them rendered empty: `{a},{b}` with
    /// neither `a` nor `b` bound is empty even though `,` remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() || (self.placeholders > 0 && self.rendered == 0)
    }
}

/// Substitutes bound values into templates.
///
/// # Example
///
/// ```
/// use stencil_core::{Bindings, Expander, Target, Template};
///
/// let bindings = Bindings::from_iter([("id", "a/b"), ("q", "x&y")]);
/// let template: Template = "/items/{id}?q={q}".parse().expect("valid");
///
/// let uri = Expander::new(&bindings)
///     .expand(&template, Target::Uri { decode_slash: false })
///     .unescape();
/// assert_eq!(uri, "/items/a%2Fb?q=x%26y");
/// ```
#[derive(Debug, Clone)]
pub struct Expander<'a> {
    bindings: &'a Bindings,
    verbatim: BTreeSet<&'a str>,
    keep_unbound: bool,
}

impl<'a> Expander<'a> {
    /// Create an expander over `bindings`.
    #[must_use]
    pub fn new(bindings: &'a Bindings) -> Self {
        Self {
            bindings,
            verbatim: BTreeSet::new(),
            keep_unbound: false,
        }
    }

    /// Variables whose values are already percent-encoded.
    #[must_use]
    pub fn verbatim(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.verbatim.extend(names);
        self
    }

    /// Leave unbound placeholders in place instead of rendering them empty.
    ///
    /// Used to substitute a subset of the variables and expand the rest later.
    #[must_use]
    pub const fn keep_unbound(mut self, keep: bool) -> Self {
        self.keep_unbound = keep;
        self
    }

    /// Expand `template`.
    #[must_use]
    pub fn expand(&self, template: &Template, target: Target) -> Expansion {
        let mut text = String::with_capacity(template.source.len());
        let mut placeholders = 0;
        let mut rendered = 0;

        for chunk in &template.chunks {
            match chunk {
                Chunk::Literal(literal) => text.push_str(literal),
                Chunk::Variable { name, in_query } => match self.bindings.get(name) {
                    Some(value) => {
                        placeholders += 1;
                        if !value.is_empty() {
                            rendered += 1;
                        }
                        let set = self.encode_set(name, *in_query, target);
                        encode_value(&mut text, &escape_braces(value), set, target);
                    }
                    None if self.keep_unbound => {
                        text.push('{');
                        text.push_str(name);
                        text.push('}');
                    }
                    None => placeholders += 1,
                },
            }
        }

        Expansion {
            text,
            placeholders,
            rendered,
        }
    }

    /// Parse and expand `source`.
    ///
    /// # Errors
    ///
    /// Fails if `source` is not a valid template.
    pub fn expand_str(&self, source: &str, target: Target) -> crate::Result<Expansion> {
        let template = Template::parse(source)?;
        Ok(self.expand(&template, target))
    }

    fn encode_set(&self, name: &str, in_query: bool, target: Target) -> &'static AsciiSet {
        if self.verbatim.contains(name) {
            return TEMPLATE_SYNTAX;
        }
        match target {
            Target::Header => TEMPLATE_SYNTAX,
            Target::Uri { .. } if in_query => QUERY_COMPONENT,
            Target::Uri { decode_slash: true } => PATH,
            Target::Uri {
                decode_slash: false,
            } => PATH_SEGMENT,
        }
    }
}

/// Replace every `{` in a value by its percent-encoded form.
#[must_use]
pub fn escape_braces(value: &str) -> String {
    value.replace('{', "%7B")
}

/// Restore `{word}` from `%7Bword%7D` and fold `%257B` into `%7B`.
///
/// # Example
///
/// ```
/// use stencil_core::unescape_braces;
///
/// assert_eq!(unescape_braces("/a?q=%7Bname%7D"), "/a?q={name}");
/// assert_eq!(unescape_braces("/a?q=%257B"), "/a?q=%7B");
/// assert_eq!(unescape_braces("/a?q=%7Bx%20y%7D"), "/a?q=%7Bx%20y%7D");
/// ```
#[must_use]
pub fn unescape_braces(text: &str) -> String {
    ESCAPED_BRACES
        .replace_all(text, "{${1}}")
        .replace("%257B", "%7B")
}

/// Percent-encode `value` into `out`, keeping valid `%XX` triplets.
///
/// A `%` that does not start a triplet is encoded in URIs and kept in headers.
fn encode_value(out: &mut String, value: &str, set: &'static AsciiSet, target: Target) {
    let mut rest = value;
    while let Some(position) = rest.find('%') {
        let (head, tail) = rest.split_at(position);
        out.extend(utf8_percent_encode(head, set));
        if let Some(triplet) = tail.get(..3).filter(|t| is_pct_triplet(t)) {
            out.push_str(triplet);
            rest = tail.get(3..).unwrap_or_default();
        } else {
            out.push_str(match target {
                Target::Uri { .. } => "%25",
                Target::Header => "%",
            });
            rest = tail.get(1..).unwrap_or_default();
        }
    }
    out.extend(utf8_percent_encode(rest, set));
}

fn is_pct_triplet(s: &str) -> bool {
    matches!(s.as_bytes(), [b'%', hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}
