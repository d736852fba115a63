//! Bindable derive macro implementation.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Fields, LitStr, Type, parse2};

/// Parameter role, mirrored from `stencil::Role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Path,
    Query,
    Header,
    Form,
}

impl Role {
    fn from_ident(ident: &syn::Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "form" => Some(Self::Form),
            _ => None,
        }
    }

    fn to_tokens(self) -> TokenStream {
        match self {
            Self::Path => quote!(::stencil::Role::Path),
            Self::Query => quote!(::stencil::Role::Query),
            Self::Header => quote!(::stencil::Role::Header),
            Self::Form => quote!(::stencil::Role::Form),
        }
    }
}

/// Case conversion rules for `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
enum RenameRule {
    LowerCase,
    UpperCase,
    CamelCase,
    PascalCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    fn parse(s: &str) -> Option<Self> {
        let rule = match s {
            "lowercase" => Self::LowerCase,
            "UPPERCASE" => Self::UpperCase,
            "camelCase" => Self::CamelCase,
            "PascalCase" => Self::PascalCase,
            "snake_case" => Self::SnakeCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebabCase,
            _ => return None,
        };
        Some(rule)
    }

    /// Apply the rule to a `snake_case` field name.
    fn apply(self, field: &str) -> String {
        match self {
            Self::LowerCase => field.to_lowercase(),
            Self::SnakeCase => field.to_string(),
            Self::UpperCase | Self::ScreamingSnakeCase => field.to_uppercase(),
            Self::CamelCase => camel_case(field, false),
            Self::PascalCase => camel_case(field, true),
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_uppercase().replace('_', "-"),
        }
    }
}

fn camel_case(field: &str, capitalize_first: bool) -> String {
    let mut result = String::with_capacity(field.len());
    let mut capitalize = capitalize_first;
    for c in field.chars() {
        if c == '_' {
            capitalize = !result.is_empty() || capitalize_first;
        } else if capitalize {
            result.extend(c.to_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Struct-level options parsed from `#[param(...)]` attributes.
#[derive(Debug, Default)]
struct StructOptions {
    rename_all: Option<RenameRule>,
}

/// Field options parsed from `#[param(...)]` attributes.
#[derive(Debug, Default)]
struct FieldOptions {
    role: Option<(Role, Option<LitStr>)>,
    encoded: bool,
}

/// Expand the `#[derive(Bindable)]` macro.
pub fn expand_bindable_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let syn::Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "Bindable derive only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input,
            "Bindable derive only supports structs with named fields",
        ));
    };

    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();
    let mut seen = BTreeSet::new();

    for field in &fields.named {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        let Some((role, explicit)) = options.role else {
            continue;
        };

        let field_str = field_name.unraw().to_string();
        let param_name = match &explicit {
            Some(lit) => lit.value(),
            None => struct_options
                .rename_all
                .map_or_else(|| field_str.clone(), |rule| rule.apply(&field_str)),
        };
        if param_name.is_empty() {
            return Err(syn::Error::new_spanned(
                explicit.as_ref().map_or_else(|| quote!(#field_name), |lit| quote!(#lit)),
                "parameter name must not be empty",
            ));
        }
        if !seen.insert(param_name.clone()) {
            return Err(syn::Error::new_spanned(
                field_name,
                format!("duplicate parameter name \"{param_name}\""),
            ));
        }

        let role = role.to_tokens();
        let encoded = options.encoded;
        descriptors.push(quote! {
            ::stencil::FieldDescriptor {
                role: #role,
                name: #param_name,
                field: #field_str,
                encoded: #encoded,
            }
        });
        accessors.push(generate_accessor(field_name, &field.ty, &param_name));
    }

    Ok(quote! {
        impl #impl_generics ::stencil::Bindable for #name #ty_generics #where_clause {
            fn fields() -> &'static [::stencil::FieldDescriptor] {
                const FIELDS: &[::stencil::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn value(&self, name: &str) -> ::std::option::Option<::std::string::String> {
                match name {
                    #(#accessors)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

/// Parse struct-level options from `#[param(...)]` attributes.
fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<StructOptions> {
    let mut options = StructOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename_all") {
                return Err(meta.error("unsupported struct attribute, expected `rename_all`"));
            }
            let value: LitStr = meta.value()?.parse()?;
            let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                syn::Error::new_spanned(
                    &value,
                    format!(
                        "unknown rename_all value: \"{}\". Expected one of: \
                         lowercase, UPPERCASE, camelCase, PascalCase, \
                         snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                        value.value()
                    ),
                )
            })?;
            options.rename_all = Some(rule);
            Ok(())
        })?;
    }

    Ok(options)
}

/// Parse field options from `#[param(...)]` attributes.
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("param")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("encoded") {
                options.encoded = true;
                return Ok(());
            }
            let role = meta
                .path
                .get_ident()
                .and_then(Role::from_ident)
                .ok_or_else(|| {
                    meta.error("expected one of `path`, `query`, `header`, `form` or `encoded`")
                })?;
            if options.role.is_some() {
                return Err(meta.error("a field can only have one role"));
            }
            let explicit = if meta.input.peek(syn::Token![=]) {
                Some(meta.value()?.parse::<LitStr>()?)
            } else {
                None
            };
            options.role = Some((role, explicit));
            Ok(())
        })?;
    }

    if options.encoded && options.role.is_none() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "`encoded` requires a role such as `query`",
        ));
    }

    Ok(options)
}

/// Generate the `value` match arm for one field.
fn generate_accessor(field_name: &syn::Ident, field_ty: &Type, param_name: &str) -> TokenStream {
    if is_option_type(field_ty) {
        quote! {
            #param_name => self.#field_name.as_ref().map(::std::string::ToString::to_string),
        }
    } else {
        quote! {
            #param_name => ::std::option::Option::Some(::std::string::ToString::to_string(&self.#field_name)),
        }
    }
}

/// Check if a type is `Option<T>`.
fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}
