//! Procedural macros for stencil.
//!
//! - `#[derive(Bindable)]` - declare an aggregate type whose fields carry
//!   path, query, header or form parameters
//!
//! # Example
//!
//! ```ignore
//! use stencil::Bindable;
//!
//! #[derive(Bindable)]
//! struct MixedParams {
//!     #[param(path)]
//!     id2: u64,
//!     #[param(query)]
//!     param2: Option<String>,
//!     #[param(header)]
//!     header2: Option<String>,
//! }
//! ```

mod bindable_derive;

use proc_macro::TokenStream;

/// Derive macro for aggregate parameter types.
///
/// Generates an implementation of `stencil::Bindable`: a static table of the
/// annotated fields and an accessor returning each field's current value as
/// a string. `Option` fields are unset when `None`; other fields are always
/// set.
///
/// # Field attributes
///
/// - `#[param(path)]`, `#[param(query)]`, `#[param(header)]`, `#[param(form)]` -
///   the role, named after the field
/// - `#[param(query = "name")]` - the role with an explicit name
/// - `#[param(query, encoded)]` - the value is already percent-encoded
///
/// Fields without a role are not part of the table.
///
/// # Struct attributes
///
/// - `#[param(rename_all = "...")]` - apply a case convention to implicit
///   names: `lowercase`, `UPPERCASE`, `camelCase`, `PascalCase`,
///   `snake_case`, `SCREAMING_SNAKE_CASE`, `kebab-case`,
///   `SCREAMING-KEBAB-CASE`
///
/// # Example
///
/// ```ignore
/// use stencil::Bindable;
///
/// #[derive(Bindable)]
/// #[param(rename_all = "kebab-case")]
/// struct Tracing {
///     #[param(header = "X-Request-Id")]
///     request_id: String,
///     #[param(query)]
///     trace_level: Option<u8>, // becomes "trace-level"
/// }
/// ```
#[proc_macro_derive(Bindable, attributes(param))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    bindable_derive::expand_bindable_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
