//! Removal of empty aggregate query clauses.
//!
//! An aggregate field that is unset must not leave a dangling `name=` in the
//! query string. Direct arguments are never pruned: an absent direct query
//! value still renders as `name=`.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{Bindings, Template, variable_name};

/// Remove every `name={name}` clause whose variable comes from an aggregate
/// and is absent or empty, then tidy the separators.
///
/// A clause is only recognized at the start of the template or right after
/// `?` or `&`. Its key is the variable itself or a name mapping to it through
/// [`variable_name`], as in `page-size={page_size}`. After removal `?&` collapses to `?` and a trailing `?` is
/// dropped.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use stencil_core::{Bindings, prune_query_clauses};
///
/// let bindings = Bindings::from_iter([("two", "2")]);
/// let aggregate = BTreeSet::from(["one", "two", "three"]);
/// let uri = "/q?one={one}&two={two}&three={three}";
///
/// assert_eq!(prune_query_clauses(uri, &bindings, &aggregate), "/q?two={two}");
/// ```
#[must_use]
pub fn prune_query_clauses(uri: &str, bindings: &Bindings, aggregate: &BTreeSet<&str>) -> String {
    let Ok(template) = Template::parse(uri) else {
        // let expansion report the syntax error
        return uri.to_string();
    };

    let mut pruned = uri.to_string();
    let mut removed = false;
    for name in template.variables() {
        if aggregate.contains(name) && bindings.is_blank(name) && remove_clause(&mut pruned, name) {
            trace!(%name, "pruned empty query clause");
            removed = true;
        }
    }
    if !removed {
        return pruned;
    }

    let mut pruned = pruned.replace("?&", "?");
    if pruned.ends_with('?') {
        pruned.pop();
    }
    pruned
}

fn remove_clause(uri: &mut String, name: &str) -> bool {
    let value = format!("={{{name}}}");
    let mut removed = false;
    let mut from = 0;

    while let Some(offset) = uri.get(from..).and_then(|rest| rest.find(&value)) {
        let key_end = from + offset;
        let end = key_end + value.len();
        let head = uri.get(..key_end).unwrap_or_default();
        let key_start = head.rfind(['?', '&']).map_or(0, |separator| separator + 1);
        let key = head.get(key_start..).unwrap_or_default();
        if key != name && variable_name(key) != name {
            from = end;
            continue;
        }

        // drop the leading `&`, keep a leading `?`
        let start = if head.get(..key_start).is_some_and(|h| h.ends_with('&')) {
            key_start - 1
        } else {
            key_start
        };
        uri.replace_range(start..end, "");
        from = start;
        removed = true;
    }
    removed
}
