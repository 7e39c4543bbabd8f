//! Source generator for typed collection wrappers.
//!
//! The output is built as a token stream, parsed back into a [`syn::File`] and pretty printed,
//! so it is always syntactically valid and byte-identical for the same schema.

pub mod naming;

use crate::collection::Collection;
use crate::element::{Element, ElementCategory, FieldKind, ValueType};
use crate::error::ZenkitError;
use naming::{to_snake_case, to_title_case, to_upper_case, unique_ident};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};
use std::collections::HashSet;

pub const DEFAULT_PREFIX: &str = "zenkit";

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

fn field_view(kind: FieldKind) -> (Ident, Ident) {
    let (view, into) = match kind {
        FieldKind::Text => ("TextField", "into_text"),
        FieldKind::Number => ("NumberField", "into_number"),
        FieldKind::Link => ("LinkField", "into_link"),
        FieldKind::Date => ("DateField", "into_date"),
        FieldKind::Categories => ("CategoriesField", "into_categories"),
        FieldKind::Persons => ("PersonsField", "into_persons"),
        FieldKind::References => ("ReferencesField", "into_references"),
    };
    (ident(view), ident(into))
}

fn label_enum(krate: &syn::Path, element: &Element, taken: &mut HashSet<String>) -> TokenStream {
    let name = ident(&unique_ident(to_title_case(&element.name), "L", "Labels", element.id, taken));
    let mut seen = HashSet::new();
    let mut variant_names = HashSet::new();
    let (variants, ids): (Vec<Ident>, Vec<Literal>) = element
        .labels()
        .iter()
        .filter(|label| seen.insert(label.id))
        .map(|label| {
            let variant = unique_ident(to_upper_case(&label.name), "_", "LABEL", label.id, &mut variant_names);
            (ident(&variant), Literal::u64_unsuffixed(label.id))
        })
        .unzip();
    let doc = format!(" Labels of the element \"{}\".", element.name);
    quote! {
        #[doc = #doc]
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u64)]
        pub enum #name {
            #(#variants = #ids,)*
        }

        impl #name {
            pub fn id(self) -> u64 {
                self as u64
            }

            pub fn from_id(id: u64) -> Option<Self> {
                match id {
                    #(#ids => Some(Self::#variants),)*
                    _ => None,
                }
            }
        }

        impl From<#name> for #krate::LabelRef<'static> {
            fn from(label: #name) -> Self {
                #krate::LabelRef::Id(label.id())
            }
        }
    }
}

fn accessor(krate: &syn::Path, element: &Element, kind: FieldKind, taken: &mut HashSet<String>) -> TokenStream {
    let method = ident(&unique_ident(to_snake_case(&element.name), "field_", "field", element.id, taken));
    let (view, into) = field_view(kind);
    let name = &element.name;
    quote! {
        pub fn #method(&mut self) -> Option<#krate::fields::#view<'_>> {
            self.0.field_mut(#name).and_then(#krate::Field::#into)
        }
    }
}

fn primary_type(krate: &syn::Path, elements: &[Element]) -> TokenStream {
    match elements.iter().find(|e| e.is_primary).and_then(Element::value_type) {
        Some(ValueType::String) => quote!(String),
        Some(ValueType::Number) => quote!(f64),
        Some(ValueType::Boolean) => quote!(bool),
        _ => quote!(#krate::serde_json::Value),
    }
}

/// Renders the typed wrapper module for `collection`, whose schema must already be fetched.
/// `prefix` is the path the generated code uses to reach this crate.
pub fn generate_orm(collection: &Collection, prefix: &str) -> Result<String, ZenkitError> {
    let elements = collection
        .cached_elements()
        .ok_or_else(|| ZenkitError::SchemaNotFetched { collection: collection.name().to_string() })?;
    let krate: syn::Path =
        syn::parse_str(prefix).map_err(|e| ZenkitError::Codegen(format!("invalid crate path '{}': {}", prefix, e)))?;

    let mut base = to_title_case(collection.name());
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base = format!("Collection{}", base);
    }
    let entry = format_ident!("{}Entry", base);
    let wrapper = format_ident!("{}Collection", base);
    let mut types: HashSet<String> = [entry.to_string(), wrapper.to_string()].into_iter().collect();
    let mut methods = HashSet::new();

    let enums: Vec<TokenStream> = elements
        .iter()
        .filter(|e| e.category == ElementCategory::Categories && !e.labels().is_empty())
        .map(|e| label_enum(&krate, e, &mut types))
        .collect();
    let accessors: Vec<TokenStream> = elements
        .iter()
        .filter_map(|e| e.field_kind().map(|kind| accessor(&krate, e, kind, &mut methods)))
        .collect();
    let primary = primary_type(&krate, elements);

    let id = Literal::u64_unsuffixed(collection.id());
    let uuid = collection.uuid();
    let workspace_id = Literal::u64_unsuffixed(collection.workspace_id());
    let header = format!(" Typed wrappers for the collection \"{}\" ({}).", collection.name(), collection.id());
    let notice = " Generated by zenkit_orm, regenerate instead of editing.";

    let tokens = quote! {
        #![doc = #header]
        #![doc = ""]
        #![doc = #notice]

        #(#enums)*

        pub struct #entry<'a>(&'a mut #krate::Entry);

        impl<'a> #entry<'a> {
            pub fn new(entry: &'a mut #krate::Entry) -> Self {
                Self(entry)
            }

            #(#accessors)*
        }

        impl std::ops::Deref for #entry<'_> {
            type Target = #krate::Entry;

            fn deref(&self) -> &#krate::Entry {
                &*self.0
            }
        }

        impl std::ops::DerefMut for #entry<'_> {
            fn deref_mut(&mut self) -> &mut #krate::Entry {
                &mut *self.0
            }
        }

        pub struct #wrapper(#krate::Collection);

        impl #krate::TypedCollection for #wrapper {
            const ID: u64 = #id;
            const UUID: &'static str = #uuid;
            const WORKSPACE_ID: u64 = #workspace_id;

            fn from_collection(collection: #krate::Collection) -> Self {
                Self(collection)
            }

            fn into_collection(self) -> #krate::Collection {
                self.0
            }

            fn collection(&self) -> &#krate::Collection {
                &self.0
            }

            fn collection_mut(&mut self) -> &mut #krate::Collection {
                &mut self.0
            }
        }

        impl #wrapper {
            pub fn entry(&mut self, lookup: impl Into<#krate::EntryLookup>) -> Option<#entry<'_>> {
                self.0.entry_mut(lookup).map(#entry)
            }

            pub fn entries(&mut self) -> impl Iterator<Item = #entry<'_>> + '_ {
                self.0.entries_mut().iter_mut().map(#entry)
            }

            pub async fn create_entry(
                &mut self,
                primary_value: #primary,
                data: #krate::serde_json::Map<String, #krate::serde_json::Value>,
            ) -> Result<#entry<'_>, #krate::ZenkitError> {
                self.0.create_entry(primary_value, data).await.map(#entry)
            }
        }

        impl std::ops::Deref for #wrapper {
            type Target = #krate::Collection;

            fn deref(&self) -> &#krate::Collection {
                &self.0
            }
        }

        impl std::ops::DerefMut for #wrapper {
            fn deref_mut(&mut self) -> &mut #krate::Collection {
                &mut self.0
            }
        }

        pub fn register(registry: &mut #krate::CollectionRegistry) {
            registry.register::<#wrapper>();
        }
    };

    let file: syn::File = syn::parse2(tokens).map_err(|e| ZenkitError::Codegen(e.to_string()))?;
    Ok(prettyplease::unparse(&file))
}
