//! Direct arguments.
//!
//! Top-level scalar path, query and header arguments are substituted into the
//! skeleton before the aggregate encoder runs. Placeholders that are not
//! bound here (aggregate fields, query maps, absent headers) are left in
//! place for the encoder.

use stencil_core::{
    Argument, Bindings, Descriptors, Error, Expander, RequestSkeleton, Result, Role, Target,
};
use tracing::trace;

use crate::contract::ArgumentKind;

/// Check each argument against the declared kinds.
pub(crate) fn check_arguments(kinds: &[ArgumentKind], arguments: &[Argument<'_>]) -> Result<()> {
    if kinds.len() != arguments.len() {
        return Err(Error::invalid_request(format!(
            "expected {} arguments, got {}",
            kinds.len(),
            arguments.len()
        )));
    }

    for (index, (kind, argument)) in kinds.iter().zip(arguments).enumerate() {
        let valid = match kind {
            ArgumentKind::Direct(_) => matches!(argument, Argument::Scalar(_) | Argument::Map(_)),
            ArgumentKind::Aggregate => argument.is_aggregate(),
            ArgumentKind::Body => matches!(argument, Argument::Body(_) | Argument::Map(_)),
            ArgumentKind::Ignored => true,
        };
        if !valid {
            return Err(Error::invalid_request(format!(
                "argument {index} is {argument:?}, expected {kind:?}"
            )));
        }
    }
    Ok(())
}

/// Substitute direct scalar arguments into `skeleton`.
///
/// Absent path and query values are bound to the empty string; absent header
/// values are not bound so the header keeps its declared template.
pub(crate) fn bind_direct(
    descriptors: &Descriptors,
    arguments: &[Argument<'_>],
    skeleton: &mut RequestSkeleton,
) -> Result<()> {
    let mut bindings = Bindings::new();
    for (index, argument) in arguments.iter().enumerate() {
        let Argument::Scalar(value) = argument else {
            continue;
        };
        for param in descriptors
            .for_argument(index)
            .filter(|p| !p.from_aggregate)
        {
            match (param.role, value) {
                (Role::Path | Role::Query, value) => {
                    trace!(name = %param.name, role = %param.role, "direct argument bound");
                    bindings.bind(param.variable.clone(), value.as_deref().unwrap_or_default());
                }
                (Role::Header, Some(value)) => {
                    trace!(name = %param.name, role = %param.role, "direct argument bound");
                    bindings.bind(param.variable.clone(), value);
                }
                (Role::Header, None) | (Role::Form, _) => {}
            }
        }
    }
    if bindings.is_empty() {
        return Ok(());
    }

    let expander = Expander::new(&bindings)
        .verbatim(descriptors.encoded_names())
        .keep_unbound(true);

    let uri = expander
        .expand_str(
            skeleton.uri_template(),
            Target::Uri {
                decode_slash: skeleton.decode_slash(),
            },
        )?
        .into_string();

    let mut headers = Vec::with_capacity(skeleton.headers().len());
    for (name, values) in skeleton.headers() {
        let values = values
            .iter()
            .map(|value| Ok(expander.expand_str(value, Target::Header)?.into_string()))
            .collect::<Result<Vec<_>>>()?;
        headers.push((name.clone(), values));
    }

    skeleton.set_uri_template(uri);
    for (name, values) in headers {
        skeleton.set_header(name, values);
    }
    Ok(())
}
