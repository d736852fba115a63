//! Query maps.
//!
//! A lone map argument is serialized by the body encoder and, when the URI
//! template has a query placeholder, the serialized text becomes that
//! placeholder's value instead of the request body.

use std::collections::BTreeMap;

use tracing::debug;

use crate::encoder::{EncodingContext, resolve};
use crate::{Bindings, BodyEncoder, Descriptors, Payload, RequestSkeleton, Result, Template};

pub(crate) fn encode_query_map<E: BodyEncoder>(
    delegate: &E,
    index: usize,
    map: &BTreeMap<String, String>,
    descriptors: &Descriptors,
    skeleton: &mut RequestSkeleton,
) -> Result<()> {
    let body = delegate.encode(&Payload::Map(map))?;
    let template = Template::parse(skeleton.uri_template())?;

    let Some(variable) = template.query_variables().next() else {
        debug!(entries = map.len(), "no query placeholder, map sent as body");
        skeleton.set_body(Some(body));
        return Ok(());
    };

    let mut bindings = Bindings::new();
    bindings.bind(variable, body.as_text()?);
    debug!(%variable, entries = map.len(), "query map bound");

    let context = EncodingContext {
        argument_index: index,
        aggregate_names: None,
        bindings,
        form: BTreeMap::new(),
    };
    let resolution = resolve(
        skeleton.uri_template(),
        skeleton.headers(),
        skeleton.decode_slash(),
        descriptors,
        &context,
    )?;

    skeleton.set_body(None);
    skeleton.commit(resolution);
    Ok(())
}
