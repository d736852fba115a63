//! Header reconciliation after expansion.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{Expander, Result, Target, Template, variable_name};

/// The outcome for one declared header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedHeader {
    /// Values produced by expansion; only non-empty entries are kept.
    Expanded(Vec<String>),
    /// Nothing expanded and the header does not come from an aggregate: the
    /// declared values are kept as they were, placeholders included.
    Declared(Vec<String>),
}

impl ResolvedHeader {
    /// The header values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Expanded(values) | Self::Declared(values) => values,
        }
    }

    /// Whether the values were kept unexpanded.
    #[must_use]
    pub const fn is_declared(&self) -> bool {
        matches!(self, Self::Declared(_))
    }
}

/// Expand every header template and decide what is sent.
///
/// For each header, in declaration order:
/// - the non-empty expanded values, if any, are kept;
/// - otherwise a header whose name or template variables belong to an
///   aggregate is omitted;
/// - otherwise the declared values are kept unchanged.
///
/// # Errors
///
/// Fails if a header value is not a valid template.
pub fn reconcile_headers(
    headers: &IndexMap<String, Vec<String>>,
    expander: &Expander<'_>,
    aggregate: &BTreeSet<&str>,
) -> Result<IndexMap<String, ResolvedHeader>> {
    let mut resolved = IndexMap::with_capacity(headers.len());

    for (name, values) in headers {
        let mut expanded = Vec::with_capacity(values.len());
        let mut from_aggregate = aggregate.contains(variable_name(name).as_str());

        for value in values {
            let template = Template::parse(value)?;
            from_aggregate |= template.variables().any(|var| aggregate.contains(var));

            let expansion = expander.expand(&template, Target::Header);
            if expansion.is_empty() {
                trace!(header = %name, %value, "header value expanded to nothing");
            } else {
                expanded.push(expansion.unescape());
            }
        }

        if !expanded.is_empty() {
            resolved.insert(name.clone(), ResolvedHeader::Expanded(expanded));
        } else if from_aggregate {
            debug!(header = %name, "omitting empty aggregate header");
        } else {
            resolved.insert(name.clone(), ResolvedHeader::Declared(values.clone()));
        }
    }

    Ok(resolved)
}
