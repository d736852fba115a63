//! The aggregate encoder.
//!
//! Runs once per invocation, after direct scalar arguments have been
//! substituted into the skeleton. It reads the aggregate arguments through
//! their [`Bindable`](crate::Bindable) tables, prunes empty aggregate query
//! clauses, expands the URI and header templates and commits the result.
//! Plain values (form fields, bodies, query maps) are handed to the
//! [`BodyEncoder`] delegate.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::bridge::encode_query_map;
use crate::skeleton::Resolution;
use crate::{
    Argument, Bindings, Body, BodyEncoder, DefaultEncoder, Descriptors, Expander, Payload,
    RequestSkeleton, Result, Role, Target, Template, prune_query_clauses, reconcile_headers,
};

/// Everything the encoder gathered from the arguments of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingContext<'d> {
    /// Index of the first aggregate argument, or of the first argument when
    /// there is none.
    pub argument_index: usize,
    /// Template variables declared by the aggregates passed in, `None`
    /// without aggregates.
    pub aggregate_names: Option<BTreeSet<&'d str>>,
    /// Values read from aggregate fields, keyed by template variable.
    pub bindings: Bindings,
    /// Form fields, from aggregates and direct form arguments or maps.
    pub form: BTreeMap<String, String>,
}

impl<'d> EncodingContext<'d> {
    /// Collect values from `arguments`, given as `(index, argument)` pairs.
    ///
    /// Several aggregates are merged: their bindings share one namespace and
    /// a later aggregate overwrites an earlier one's value for the same name.
    #[must_use]
    pub fn collect(descriptors: &'d Descriptors, arguments: &[(usize, &Argument<'_>)]) -> Self {
        let mut context = Self {
            argument_index: arguments.first().map_or(0, |(index, _)| *index),
            ..Self::default()
        };
        let mut first_aggregate = None;
        let mut names = BTreeSet::new();

        for (index, argument) in arguments {
            match argument {
                Argument::Aggregate(aggregate) => {
                    first_aggregate.get_or_insert(*index);
                    for param in descriptors.for_argument(*index).filter(|p| p.from_aggregate) {
                        names.insert(param.variable.as_str());
                        let Some(value) = aggregate.value(&param.name) else {
                            trace!(name = %param.name, "aggregate field unset");
                            continue;
                        };
                        trace!(name = %param.name, role = %param.role, "aggregate field bound");
                        if param.role == Role::Form {
                            context.form.insert(param.name.clone(), value);
                        } else {
                            context.bindings.bind(param.variable.clone(), value);
                        }
                    }
                }
                Argument::Scalar(Some(value)) => {
                    for param in descriptors
                        .for_argument(*index)
                        .filter(|p| p.role == Role::Form && !p.from_aggregate)
                    {
                        context.form.insert(param.name.clone(), value.clone());
                    }
                }
                Argument::Map(map)
                    if descriptors
                        .for_argument(*index)
                        .any(|p| p.role == Role::Form && !p.from_aggregate) =>
                {
                    context.form.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Argument::Scalar(None) | Argument::Map(_) | Argument::Body(_) => {}
            }
        }

        if let Some(index) = first_aggregate {
            context.argument_index = index;
            context.aggregate_names = Some(names);
        }
        context
    }

    /// Whether an aggregate argument was found.
    #[must_use]
    pub const fn has_aggregate(&self) -> bool {
        self.aggregate_names.is_some()
    }
}

/// Resolves the URI and headers of a [`RequestSkeleton`].
///
/// # Example
///
/// ```
/// use stencil_core::prelude::*;
///
/// # fn main() -> stencil_core::Result<()> {
/// let descriptors = Descriptors::from_iter([ParamDescriptor::direct(Role::Query, "q", 0)]);
/// let mut skeleton = RequestSkeleton::new(Method::Get, "/search?q=rust");
///
/// let encoder = AggregateEncoder::new(DefaultEncoder);
/// encoder.encode(&descriptors, &[Argument::scalar("rust")], &mut skeleton)?;
/// assert_eq!(skeleton.resolved_uri(), Some("/search?q=rust"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AggregateEncoder<E = DefaultEncoder> {
    delegate: E,
}

impl<E: BodyEncoder> AggregateEncoder<E> {
    /// Create an encoder delegating plain values to `delegate`.
    pub const fn new(delegate: E) -> Self {
        Self { delegate }
    }

    /// The body encoder used for plain values.
    pub const fn delegate(&self) -> &E {
        &self.delegate
    }

    /// Encode the arguments of one invocation into `skeleton`.
    ///
    /// Arguments that are top-level path parameters are skipped: they were
    /// substituted already. When nothing else remains the skeleton is left
    /// untouched.
    ///
    /// On success the skeleton holds the pruned URI template, the resolved
    /// URI and the reconciled headers. On failure it is left as it was.
    ///
    /// # Errors
    ///
    /// Fails on a malformed URI or header template, or when the delegate
    /// fails.
    pub fn encode(
        &self,
        descriptors: &Descriptors,
        arguments: &[Argument<'_>],
        skeleton: &mut RequestSkeleton,
    ) -> Result<()> {
        let remaining: Vec<_> = arguments
            .iter()
            .enumerate()
            .filter(|(index, _)| !descriptors.is_direct_path(*index))
            .collect();

        if remaining.is_empty() {
            debug!(method = %skeleton.method(), "nothing to encode");
            return Ok(());
        }

        if let [(index, Argument::Map(map))] = remaining.as_slice()
            && !descriptors.for_argument(*index).any(|p| p.from_aggregate)
        {
            return encode_query_map(&self.delegate, *index, map, descriptors, skeleton);
        }

        let mut context = EncodingContext::collect(descriptors, &remaining);
        self.bind_maps(descriptors, &remaining, &mut context)?;
        debug!(
            method = %skeleton.method(),
            argument_index = context.argument_index,
            aggregate = context.has_aggregate(),
            bound = context.bindings.len(),
            "encoding request"
        );

        let body = self.encode_body(descriptors, &remaining, &context)?;
        if body.is_some() && !skeleton.method().expects_body() {
            debug!(method = %skeleton.method(), "body encoded for a bodiless method");
        }
        let resolution = resolve(
            skeleton.uri_template(),
            skeleton.headers(),
            skeleton.decode_slash(),
            descriptors,
            &context,
        )?;

        if body.is_some() {
            skeleton.set_body(body);
        }
        skeleton.commit(resolution);
        Ok(())
    }

    /// Serialize maps passed for direct query or header parameters and bind
    /// them under the parameter's variable.
    fn bind_maps(
        &self,
        descriptors: &Descriptors,
        arguments: &[(usize, &Argument<'_>)],
        context: &mut EncodingContext<'_>,
    ) -> Result<()> {
        for (index, argument) in arguments {
            let Argument::Map(map) = argument else {
                continue;
            };
            for param in descriptors
                .for_argument(*index)
                .filter(|p| !p.from_aggregate && matches!(p.role, Role::Query | Role::Header))
            {
                let serialized = self.delegate.encode(&Payload::Map(map))?;
                trace!(name = %param.name, entries = map.len(), "map argument bound");
                context
                    .bindings
                    .bind(param.variable.clone(), serialized.as_text()?);
            }
        }
        Ok(())
    }

    /// The explicit body is an `Argument::Body`, or a map no parameter is
    /// declared for.
    fn encode_body(
        &self,
        descriptors: &Descriptors,
        arguments: &[(usize, &Argument<'_>)],
        context: &EncodingContext<'_>,
    ) -> Result<Option<Body>> {
        let explicit = arguments.iter().find_map(|(index, argument)| match argument {
            Argument::Body(payload) => Some(self.delegate.encode(payload)),
            Argument::Map(map) if descriptors.for_argument(*index).next().is_none() => {
                Some(self.delegate.encode(&Payload::Map(map)))
            }
            _ => None,
        });

        if let Some(body) = explicit {
            if !context.form.is_empty() {
                debug!(fields = context.form.len(), "explicit body wins over form fields");
            }
            return body.map(Some);
        }
        if context.form.is_empty() {
            return Ok(None);
        }
        self.delegate.encode(&Payload::Map(&context.form)).map(Some)
    }
}

/// Prune, expand and reconcile, without touching the skeleton.
pub(crate) fn resolve(
    uri_template: &str,
    headers: &IndexMap<String, Vec<String>>,
    decode_slash: bool,
    descriptors: &Descriptors,
    context: &EncodingContext<'_>,
) -> Result<Resolution> {
    let aggregate = context.aggregate_names.clone().unwrap_or_default();

    let pruned = prune_query_clauses(uri_template, &context.bindings, &aggregate);
    let template = Template::parse(&pruned)?;

    let expander = Expander::new(&context.bindings).verbatim(descriptors.encoded_names());
    let uri = expander
        .expand(&template, Target::Uri { decode_slash })
        .unescape();
    let headers = reconcile_headers(headers, &expander, &aggregate)?;
    trace!(%uri, headers = headers.len(), "resolved");

    Ok(Resolution {
        uri_template: pruned,
        uri,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::{Bindable, ContentType, FieldDescriptor, Method, ParamDescriptor, ResolvedHeader};

    #[derive(Default)]
    struct QueryParamBean {
        one: Option<String>,
        two: Option<String>,
        three: Option<String>,
    }

    impl Bindable for QueryParamBean {
        fn fields() -> &'static [FieldDescriptor] {
            &[]
        }

        fn value(&self, name: &str) -> Option<String> {
            match name {
                "one" => self.one.clone(),
                "two" => self.two.clone(),
                "three" => self.three.clone(),
                _ => None,
            }
        }
    }

    #[derive(Default)]
    struct HeaderBean {
        test1: Option<String>,
        test2: Option<String>,
    }

    impl Bindable for HeaderBean {
        fn fields() -> &'static [FieldDescriptor] {
            &[]
        }

        fn value(&self, name: &str) -> Option<String> {
            match name {
                "test1" => self.test1.clone(),
                "test2" => self.test2.clone(),
                _ => None,
            }
        }
    }

    struct PathBean {
        id1: i32,
        id2: i32,
    }

    impl Bindable for PathBean {
        fn fields() -> &'static [FieldDescriptor] {
            &[]
        }

        fn value(&self, name: &str) -> Option<String> {
            match name {
                "id1" => Some(self.id1.to_string()),
                "id2" => Some(self.id2.to_string()),
                _ => None,
            }
        }
    }

    struct FailingEncoder;

    impl BodyEncoder for FailingEncoder {
        fn encode(&self, _payload: &Payload<'_>) -> Result<Body> {
            Err(crate::Error::encode("boom"))
        }
    }

    fn query_bean_descriptors() -> Descriptors {
        ["one", "two", "three"]
            .into_iter()
            .map(|name| ParamDescriptor::aggregate(Role::Query, name, 0))
            .collect()
    }

    fn query_bean_skeleton() -> RequestSkeleton {
        RequestSkeleton::new(Method::Get, "/query?one={one}&two={two}&three={three}")
    }

    fn header_bean() -> (Descriptors, RequestSkeleton) {
        let descriptors = ["test1", "test2"]
            .into_iter()
            .map(|name| ParamDescriptor::aggregate(Role::Header, name, 0))
            .collect();
        let skeleton = RequestSkeleton::new(Method::Get, "/headers").with_header("test", "{test1},{test2}");
        (descriptors, skeleton)
    }

    fn encode(descriptors: &Descriptors, arguments: &[Argument<'_>], skeleton: &mut RequestSkeleton) {
        AggregateEncoder::<DefaultEncoder>::default()
            .encode(descriptors, arguments, skeleton)
            .expect("encode");
    }

    #[test]
    fn partial_query_aggregate() {
        let bean = QueryParamBean {
            one: Some("a".to_string()),
            three: Some("c".to_string()),
            ..QueryParamBean::default()
        };
        let mut skeleton = query_bean_skeleton();
        encode(&query_bean_descriptors(), &[Argument::aggregate(&bean)], &mut skeleton);

        insta::assert_snapshot!(skeleton.resolved_uri().unwrap_or_default(), @"/query?one=a&three=c");
        assert_eq!(skeleton.uri_template(), "/query?one={one}&three={three}");
    }

    #[test]
    fn unset_query_aggregate_leaves_bare_path() {
        let bean = QueryParamBean::default();
        let mut skeleton = query_bean_skeleton();
        encode(&query_bean_descriptors(), &[Argument::aggregate(&bean)], &mut skeleton);

        assert_eq!(skeleton.resolved_uri(), Some("/query"));
    }

    #[test]
    fn empty_string_fields_are_pruned() {
        let bean = QueryParamBean {
            one: Some(String::new()),
            two: Some("b".to_string()),
            three: Some("c".to_string()),
        };
        let mut skeleton = query_bean_skeleton();
        encode(&query_bean_descriptors(), &[Argument::aggregate(&bean)], &mut skeleton);

        assert_eq!(skeleton.resolved_uri(), Some("/query?two=b&three=c"));
    }

    #[test]
    fn header_aggregate_partially_set() {
        let (descriptors, mut skeleton) = header_bean();
        let bean = HeaderBean {
            test1: Some("x".to_string()),
            test2: None,
        };
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut skeleton);

        assert_eq!(skeleton.resolved_header("test"), Some(["x,".to_string()].as_slice()));
        assert_eq!(skeleton.resolved_uri(), Some("/headers"));
    }

    #[test]
    fn header_aggregate_unset_is_omitted() {
        let (descriptors, mut skeleton) = header_bean();
        let bean = HeaderBean::default();
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut skeleton);

        let_assert!(Some(headers) = skeleton.resolved_headers());
        check!(headers.is_empty());
    }

    #[test]
    fn path_aggregate() {
        let descriptors = ["id1", "id2"]
            .into_iter()
            .map(|name| ParamDescriptor::aggregate(Role::Path, name, 0))
            .collect();
        let mut skeleton = RequestSkeleton::new(Method::Get, "/{id1}/{id2}");
        encode(&descriptors, &[Argument::aggregate(&PathBean { id1: 5, id2: 9 })], &mut skeleton);

        assert_eq!(skeleton.resolved_uri(), Some("/5/9"));
    }

    #[test]
    fn direct_path_arguments_only_is_a_no_op() {
        let descriptors = Descriptors::from_iter([ParamDescriptor::direct(Role::Path, "id", 0)]);
        let mut skeleton = RequestSkeleton::new(Method::Get, "/users/7");
        let before = skeleton.clone();
        encode(&descriptors, &[Argument::scalar(7)], &mut skeleton);

        assert_eq!(skeleton, before);
        assert!(skeleton.resolved_uri().is_none());
    }

    #[test]
    fn no_arguments_is_a_no_op() {
        let mut skeleton = RequestSkeleton::new(Method::Get, "/ping");
        let before = skeleton.clone();
        encode(&Descriptors::default(), &[], &mut skeleton);
        assert_eq!(skeleton, before);
    }

    #[test]
    fn malformed_template_leaves_skeleton_untouched() {
        let bean = QueryParamBean::default();
        let mut skeleton = RequestSkeleton::new(Method::Get, "/query?one={one");
        let before = skeleton.clone();

        let result = AggregateEncoder::<DefaultEncoder>::default().encode(
            &query_bean_descriptors(),
            &[Argument::aggregate(&bean)],
            &mut skeleton,
        );
        let_assert!(Err(err) = result);
        check!(err.is_template());
        check!(skeleton == before);
    }

    #[test]
    fn brace_value_round_trips() {
        let bean = QueryParamBean {
            one: Some("{abc}".to_string()),
            ..QueryParamBean::default()
        };
        let mut skeleton = query_bean_skeleton();
        encode(&query_bean_descriptors(), &[Argument::aggregate(&bean)], &mut skeleton);

        assert_eq!(skeleton.resolved_uri(), Some("/query?one={abc}"));
    }

    #[test]
    fn encoding_twice_is_stable() {
        let bean = PathBean { id1: 5, id2: 9 };
        let descriptors: Descriptors = ["id1", "id2"]
            .into_iter()
            .map(|name| ParamDescriptor::aggregate(Role::Path, name, 0))
            .collect();
        let mut skeleton = RequestSkeleton::new(Method::Get, "/{id1}/{id2}");
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut skeleton);
        let first = skeleton.resolved_uri().map(str::to_string);

        let mut again = RequestSkeleton::new(Method::Get, first.clone().unwrap_or_default());
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut again);
        assert_eq!(again.resolved_uri().map(str::to_string), first);
    }

    #[test]
    fn several_aggregates_are_merged() {
        let query = QueryParamBean {
            two: Some("b".to_string()),
            ..QueryParamBean::default()
        };
        let header = HeaderBean {
            test1: Some("h".to_string()),
            test2: None,
        };
        let mut params: Vec<_> = ["one", "two", "three"]
            .into_iter()
            .map(|name| ParamDescriptor::aggregate(Role::Query, name, 0))
            .collect();
        params.extend(
            ["test1", "test2"]
                .into_iter()
                .map(|name| ParamDescriptor::aggregate(Role::Header, name, 1)),
        );
        let descriptors = Descriptors::new(params);
        let mut skeleton = query_bean_skeleton().with_header("test", "{test1},{test2}");

        encode(
            &descriptors,
            &[Argument::aggregate(&query), Argument::aggregate(&header)],
            &mut skeleton,
        );
        assert_eq!(skeleton.resolved_uri(), Some("/query?two=b"));
        assert_eq!(skeleton.resolved_header("test"), Some(["h,".to_string()].as_slice()));
    }

    #[test]
    fn context_tracks_first_aggregate() {
        let bean = QueryParamBean {
            one: Some("1".to_string()),
            ..QueryParamBean::default()
        };
        let descriptors = Descriptors::from_iter([
            ParamDescriptor::direct(Role::Query, "q", 0),
            ParamDescriptor::aggregate(Role::Query, "one", 1),
            ParamDescriptor::aggregate(Role::Query, "two", 1),
        ]);
        let scalar = Argument::scalar("x");
        let aggregate = Argument::aggregate(&bean);
        let context = EncodingContext::collect(&descriptors, &[(0, &scalar), (1, &aggregate)]);

        assert_eq!(context.argument_index, 1);
        assert_eq!(context.aggregate_names, Some(BTreeSet::from(["one", "two"])));
        assert_eq!(context.bindings.get("one"), Some("1"));
        assert_eq!(context.bindings.get("two"), None);
        // direct scalars are bound upstream
        assert_eq!(context.bindings.get("q"), None);
    }

    #[test]
    fn context_without_aggregate() {
        let descriptors = Descriptors::from_iter([ParamDescriptor::direct(Role::Query, "q", 3)]);
        let scalar = Argument::scalar("x");
        let context = EncodingContext::collect(&descriptors, &[(3, &scalar)]);
        assert_eq!(context.argument_index, 3);
        assert!(!context.has_aggregate());
    }

    #[test]
    fn form_fields_become_the_body() {
        struct Login;
        impl Bindable for Login {
            fn fields() -> &'static [FieldDescriptor] {
                &[]
            }
            fn value(&self, name: &str) -> Option<String> {
                (name == "username").then(|| "alice".to_string())
            }
        }

        let descriptors = Descriptors::from_iter([
            ParamDescriptor::aggregate(Role::Form, "username", 0),
            ParamDescriptor::aggregate(Role::Form, "password", 0),
            ParamDescriptor::direct(Role::Form, "remember", 1),
        ]);
        let mut skeleton = RequestSkeleton::new(Method::Post, "/login");
        encode(&descriptors, &[Argument::aggregate(&Login), Argument::scalar(true)], &mut skeleton);

        let_assert!(Some(body) = skeleton.body());
        check!(body.content_type == ContentType::FormUrlEncoded);
        check!(body.as_text().expect("utf8") == "remember=true&username=alice");
        check!(skeleton.resolved_uri() == Some("/login"));
    }

    #[test]
    fn explicit_body_is_delegated() {
        let descriptors = Descriptors::default();
        let mut skeleton = RequestSkeleton::new(Method::Post, "/postModel");
        encode(&descriptors, &[Argument::text("model")], &mut skeleton);

        let_assert!(Some(body) = skeleton.body());
        check!(body.as_text().expect("utf8") == "model");
        check!(body.content_type == ContentType::PlainText);
    }

    #[test]
    fn delegate_failure_propagates() {
        let mut skeleton = RequestSkeleton::new(Method::Post, "/postModel");
        let before = skeleton.clone();
        let result = AggregateEncoder::new(FailingEncoder).encode(
            &Descriptors::default(),
            &[Argument::text("model")],
            &mut skeleton,
        );
        let_assert!(Err(err) = result);
        check!(err.is_encode());
        check!(skeleton == before);
    }

    #[test]
    fn direct_header_fallback_keeps_template() {
        let descriptors = Descriptors::from_iter([
            ParamDescriptor::direct(Role::Header, "header1", 0),
            ParamDescriptor::aggregate(Role::Query, "one", 1),
        ]);
        let bean = QueryParamBean::default();
        let mut skeleton = RequestSkeleton::new(Method::Get, "/q?one={one}").with_header("header1", "{header1}");
        encode(&descriptors, &[Argument::absent(), Argument::aggregate(&bean)], &mut skeleton);

        let_assert!(Some(headers) = skeleton.resolved_headers());
        check!(headers.get("header1") == Some(&ResolvedHeader::Declared(vec!["{header1}".to_string()])));
    }

    struct TraceBean {
        trace_id: Option<String>,
    }

    impl Bindable for TraceBean {
        fn fields() -> &'static [FieldDescriptor] {
            &[]
        }

        fn value(&self, name: &str) -> Option<String> {
            (name == "X-Trace-Id").then(|| self.trace_id.clone()).flatten()
        }
    }

    #[test]
    fn hyphenated_aggregate_header() {
        let descriptors = Descriptors::from_iter([ParamDescriptor::aggregate(Role::Header, "X-Trace-Id", 0)]);
        let skeleton = RequestSkeleton::new(Method::Get, "/trace").with_header("X-Trace-Id", "{X_Trace_Id}");

        let bean = TraceBean {
            trace_id: Some("t-1".to_string()),
        };
        let mut set = skeleton.clone();
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut set);
        check!(set.resolved_header("X-Trace-Id") == Some(&["t-1".to_string()][..]));

        let bean = TraceBean { trace_id: None };
        let mut unset = skeleton;
        encode(&descriptors, &[Argument::aggregate(&bean)], &mut unset);
        check!(unset.resolved_header("X-Trace-Id").is_none());
    }

    #[test]
    fn map_body_next_to_other_arguments() {
        let map = BTreeMap::from([("k1".to_string(), "v1".to_string())]);
        let descriptors = Descriptors::from_iter([ParamDescriptor::direct(Role::Query, "q", 0)]);
        let mut skeleton = RequestSkeleton::new(Method::Post, "/x?q=a");

        encode(&descriptors, &[Argument::scalar("a"), Argument::map(&map)], &mut skeleton);

        check!(skeleton.resolved_uri() == Some("/x?q=a"));
        let_assert!(Some(body) = skeleton.body());
        check!(body.content_type == ContentType::FormUrlEncoded);
        check!(body.as_text().expect("utf8") == "k1=v1");
    }

    #[test]
    fn query_map_next_to_an_aggregate() {
        let map = BTreeMap::from([("k1".to_string(), "v1".to_string())]);
        let descriptors = Descriptors::from_iter([
            ParamDescriptor::direct(Role::Query, "filter", 0),
            ParamDescriptor::aggregate(Role::Query, "one", 1),
        ]);
        let bean = QueryParamBean {
            one: Some("a".to_string()),
            ..QueryParamBean::default()
        };
        let mut skeleton = RequestSkeleton::new(Method::Get, "/q?filter={filter}&one={one}");

        encode(&descriptors, &[Argument::map(&map), Argument::aggregate(&bean)], &mut skeleton);

        check!(skeleton.resolved_uri() == Some("/q?filter=k1%3Dv1&one=a"));
        check!(skeleton.body().is_none());
    }

    #[test]
    fn form_map_joins_the_form_fields() {
        let map = BTreeMap::from([("k1".to_string(), "v1".to_string())]);
        let descriptors = Descriptors::from_iter([
            ParamDescriptor::direct(Role::Form, "fields", 0),
            ParamDescriptor::direct(Role::Form, "user", 1),
        ]);
        let mut skeleton = RequestSkeleton::new(Method::Post, "/login");

        encode(&descriptors, &[Argument::map(&map), Argument::scalar("alice")], &mut skeleton);

        let_assert!(Some(body) = skeleton.body());
        check!(body.as_text().expect("utf8") == "k1=v1&user=alice");
    }
}
