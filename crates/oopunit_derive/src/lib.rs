//! Derive macros for oopunit test subjects.
//!
//! - `Snapshot`: generates the per-field backup/restore used to isolate tests from each other.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Index, Member, parse_macro_input};

/// Generates `oopunit::snapshot::Snapshot` for a struct.
///
/// For every field the generated `copy_state_from` picks, at compile time, the strongest duplication the
/// field's type offers:
/// 1. `oopunit::snapshot::Duplicate` (self-duplication),
/// 2. `From<&Field>` (a copy constructor),
/// 3. `oopunit::snapshot::SharedHandle` (`Rc`, `Arc`, `&'static`): the new value aliases the old one.
///
/// A field whose type offers none of these is a compile error. Mark it `#[snapshot(skip)]` to leave it out
/// of backups and restores entirely.
///
/// # Example
/// ```ignore
/// #[derive(Snapshot)]
/// struct Account {
///     balance: i64,
///     history: Vec<String>,
///     ledger: Rc<RefCell<Ledger>>, // aliased
///     #[snapshot(skip)]
///     clock: Box<dyn Fn() -> u64>,
/// }
///
/// // Generates:
/// impl oopunit::snapshot::Snapshot for Account {
///     const FIELDS: &'static [&'static str] = &["balance", "history", "ledger"];
///     fn copy_state_from(&mut self, source: &Self) { /* one assignment per field */ }
/// }
/// ```
#[proc_macro_derive(Snapshot, attributes(snapshot))]
pub fn derive_snapshot(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_snapshot(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_snapshot(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Snapshot picks a duplication strategy per concrete field type and cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(name, "Snapshot can only be derived for structs"));
        }
    };

    let mut field_names: Vec<String> = Vec::new();
    let mut copies = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        field_names.push(match &field.ident {
            Some(ident) => ident.to_string(),
            None => index.to_string(),
        });
        copies.push(quote! {
            self.#member = (&&&::oopunit::snapshot::FieldRef(&source.#member)).snapshot_field();
        });
    }

    // Unit structs and all-skipped structs never read `source`
    let touch_source = if copies.is_empty() {
        quote! { let _ = source; }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl ::oopunit::snapshot::Snapshot for #name {
            const FIELDS: &'static [&'static str] = &[#(#field_names),*];

            #[allow(clippy::needless_borrow)]
            fn copy_state_from(&mut self, source: &Self) {
                #[allow(unused_imports)]
                use ::oopunit::snapshot::{ByCopy as _, ByDuplicate as _, ByShare as _};
                #(#copies)*
                #touch_source
            }
        }
    })
}

fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("snapshot") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported snapshot option; expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
