use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Type};

/// Derive macro for symbolic model structs.
///
/// Generates `Model`, `Struct`, `Reflect`, `Symbolic` and `Known` for the
/// annotated struct, so it can be used as a conversion operand and as a
/// nested object inside other models.
///
/// The struct must implement `Default` (fields missing from a nested
/// object keep their default).
///
/// # Example
///
/// ```ignore
/// #[derive(Model, Default)]
/// pub struct ImageModel {
///     #[flex(tag = "name")]
///     pub name: StringValue,
///
///     #[flex(tag = "block_device")]
///     pub block_devices: ListNestedObject<BlockDeviceModel>,
/// }
/// ```
///
/// Field attributes: `tag = "..."` (correspondence tag), `skip`.
#[proc_macro_derive(Model, attributes(flex))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match model_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Derive macro for native structs.
///
/// Generates `NativeStruct`, `Struct`, `Reflect` and `Native`. Same
/// field attributes as `Model`; a tag is rarely needed on this side since
/// the field name is the fallback key.
#[proc_macro_derive(Native, attributes(flex))]
pub fn derive_native(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match native_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct FieldSpec<'a> {
    ident: &'a Ident,
    name: String,
    tag: Option<String>,
    ty: &'a Type,
}

impl FieldSpec<'_> {
    fn key(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.name)
    }

    fn tag_tokens(&self) -> TokenStream2 {
        match &self.tag {
            Some(tag) => quote! { ::core::option::Option::Some(#tag) },
            None => quote! { ::core::option::Option::None },
        }
    }
}

fn collect_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<Vec<FieldSpec<'a>>, syn::Error> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            format!("{derive} does not support generic structs"),
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    format!("{derive} only supports structs with named fields"),
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                format!("{derive} only supports structs"),
            ))
        }
    };

    let mut specs = Vec::new();
    for field in fields {
        let ident = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;

        // Parse #[flex(...)] attribute.
        let mut tag: Option<String> = None;
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("flex") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") {
                    let value: LitStr = meta.value()?.parse()?;
                    if value.value().is_empty() {
                        return Err(meta.error("tag must not be empty"));
                    }
                    tag = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    skip = true;
                } else {
                    return Err(meta.error("unknown flex attribute (expected `tag` or `skip`)"));
                }
                Ok(())
            })?;
        }

        if skip {
            continue;
        }

        specs.push(FieldSpec {
            ident,
            name: ident.to_string().trim_start_matches("r#").to_string(),
            tag,
            ty: &field.ty,
        });
    }
    Ok(specs)
}

fn model_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let name_str = name.to_string();
    let fields = collect_fields(input, "Model")?;

    let mut shape_tokens = Vec::new();
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();
    let mut payload_inserts = Vec::new();
    let mut payload_reads = Vec::new();

    for field in &fields {
        let ident = field.ident;
        let ty = field.ty;
        let field_name = &field.name;
        let key = field.key();
        let tag = field.tag_tokens();

        shape_tokens.push(quote! {
            ::flex_api::schema::FieldShape {
                name: #field_name,
                tag: #tag,
                ty: ::flex_api::schema::FieldType::Attr(
                    <#ty as ::flex_api::attr::Symbolic>::attr_type()
                ),
            }
        });

        get_arms.push(quote! {
            #field_name => ::core::option::Option::Some(::flex_api::reflect::FieldValue::Attr(
                ::flex_api::attr::Symbolic::to_value(&self.#ident)
            )),
        });

        set_arms.push(quote! {
            #field_name => {
                self.#ident = <#ty as ::flex_api::attr::Symbolic>::from_value(__value.into_attr()?)?;
                ::core::result::Result::Ok(())
            }
        });

        payload_inserts.push(quote! {
            __object.insert(#key, ::flex_api::attr::Symbolic::to_value(&self.#ident));
        });

        payload_reads.push(quote! {
            if let ::core::option::Option::Some(__v) = __object.remove(#key) {
                __result.#ident = <#ty as ::flex_api::attr::Symbolic>::from_value(__v)
                    .map_err(|e| e.at_field(#key))?;
            }
        });
    }

    let reflect = reflect_tokens(name);

    Ok(quote! {
        impl ::flex_api::reflect::Model for #name {
            fn struct_shape() -> ::flex_api::schema::StructShape {
                ::flex_api::schema::StructShape {
                    name: #name_str,
                    fields: ::std::vec![#(#shape_tokens),*],
                }
            }
        }

        impl ::flex_api::reflect::Struct for #name {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn shape(&self) -> ::flex_api::schema::StructShape {
                <Self as ::flex_api::reflect::Model>::struct_shape()
            }

            fn get(&self, __field: &str) -> ::core::option::Option<::flex_api::reflect::FieldValue> {
                match __field {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unreachable_code, unused_variables)]
            fn set(
                &mut self,
                __field: &str,
                __value: ::flex_api::reflect::FieldValue,
            ) -> ::core::result::Result<(), ::flex_api::error::FlexError> {
                match __field {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(::flex_api::error::FlexError::invalid_input(
                        ::std::format!("{} has no field '{}'", #name_str, __field)
                    )),
                }
            }
        }

        #reflect

        impl ::flex_api::attr::Known for #name {
            fn known_type() -> ::flex_api::schema::AttrType {
                ::flex_api::schema::AttrType::Object(
                    <Self as ::flex_api::reflect::Model>::struct_shape()
                )
            }

            fn to_payload(&self) -> ::flex_api::value::Payload {
                let mut __object = ::flex_api::value::ObjectValue::new();
                #(#payload_inserts)*
                ::flex_api::value::Payload::Object(__object)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_payload(
                __payload: ::flex_api::value::Payload,
            ) -> ::core::result::Result<Self, ::flex_api::error::FlexError> {
                match __payload {
                    ::flex_api::value::Payload::Object(mut __object) => {
                        let mut __result = <Self as ::core::default::Default>::default();
                        #(#payload_reads)*
                        ::core::result::Result::Ok(__result)
                    }
                    __other => ::core::result::Result::Err(::flex_api::error::FlexError::type_mismatch(
                        ::std::format!("expected object {}, got {}", #name_str, __other.describe())
                    )),
                }
            }
        }

        impl ::flex_api::attr::Symbolic for #name {
            fn attr_type() -> ::flex_api::schema::AttrType {
                <Self as ::flex_api::attr::Known>::known_type()
            }

            fn to_value(&self) -> ::flex_api::value::AttrValue {
                ::flex_api::value::AttrValue::Known(::flex_api::attr::Known::to_payload(self))
            }

            fn from_value(
                __value: ::flex_api::value::AttrValue,
            ) -> ::core::result::Result<Self, ::flex_api::error::FlexError> {
                ::flex_api::attr::require_known(__value)
            }
        }
    })
}

fn native_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let name_str = name.to_string();
    let fields = collect_fields(input, "Native")?;

    let mut shape_tokens = Vec::new();
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();
    let mut value_inserts = Vec::new();
    let mut value_reads = Vec::new();

    for field in &fields {
        let ident = field.ident;
        let ty = field.ty;
        let field_name = &field.name;
        let tag = field.tag_tokens();

        shape_tokens.push(quote! {
            ::flex_api::schema::FieldShape {
                name: #field_name,
                tag: #tag,
                ty: ::flex_api::schema::FieldType::Native(
                    <#ty as ::flex_api::native::Native>::native_type()
                ),
            }
        });

        get_arms.push(quote! {
            #field_name => ::core::option::Option::Some(::flex_api::reflect::FieldValue::Native(
                ::flex_api::native::Native::to_native(&self.#ident)
            )),
        });

        set_arms.push(quote! {
            #field_name => {
                self.#ident = <#ty as ::flex_api::native::Native>::from_native(__value.into_native()?)?;
                ::core::result::Result::Ok(())
            }
        });

        value_inserts.push(quote! {
            __fields.insert(#field_name, ::flex_api::native::Native::to_native(&self.#ident));
        });

        value_reads.push(quote! {
            if let ::core::option::Option::Some(__v) = __fields.remove(#field_name) {
                __result.#ident = <#ty as ::flex_api::native::Native>::from_native(__v)
                    .map_err(|e| e.at_field(#field_name))?;
            }
        });
    }

    let reflect = reflect_tokens(name);

    Ok(quote! {
        impl ::flex_api::reflect::NativeStruct for #name {
            fn struct_shape() -> ::flex_api::schema::StructShape {
                ::flex_api::schema::StructShape {
                    name: #name_str,
                    fields: ::std::vec![#(#shape_tokens),*],
                }
            }
        }

        impl ::flex_api::reflect::Struct for #name {
            fn type_name(&self) -> &'static str {
                #name_str
            }

            fn shape(&self) -> ::flex_api::schema::StructShape {
                <Self as ::flex_api::reflect::NativeStruct>::struct_shape()
            }

            fn get(&self, __field: &str) -> ::core::option::Option<::flex_api::reflect::FieldValue> {
                match __field {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unreachable_code, unused_variables)]
            fn set(
                &mut self,
                __field: &str,
                __value: ::flex_api::reflect::FieldValue,
            ) -> ::core::result::Result<(), ::flex_api::error::FlexError> {
                match __field {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(::flex_api::error::FlexError::invalid_input(
                        ::std::format!("{} has no field '{}'", #name_str, __field)
                    )),
                }
            }
        }

        #reflect

        impl ::flex_api::native::Native for #name {
            fn native_type() -> ::flex_api::schema::NativeType {
                ::flex_api::schema::NativeType::Struct(
                    <Self as ::flex_api::reflect::NativeStruct>::struct_shape()
                )
            }

            fn to_native(&self) -> ::flex_api::value::NativeValue {
                let mut __fields = ::flex_api::value::StructValue::new();
                #(#value_inserts)*
                ::flex_api::value::NativeValue::Struct(__fields)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_native(
                __value: ::flex_api::value::NativeValue,
            ) -> ::core::result::Result<Self, ::flex_api::error::FlexError> {
                match __value {
                    ::flex_api::value::NativeValue::Nil => {
                        ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
                    }
                    ::flex_api::value::NativeValue::Struct(mut __fields) => {
                        let mut __result = <Self as ::core::default::Default>::default();
                        #(#value_reads)*
                        ::core::result::Result::Ok(__result)
                    }
                    __other => ::core::result::Result::Err(::flex_api::error::FlexError::type_mismatch(
                        ::std::format!("expected struct {}, got {}", #name_str, __other.describe())
                    )),
                }
            }
        }
    })
}

fn reflect_tokens(name: &Ident) -> TokenStream2 {
    quote! {
        impl ::flex_api::reflect::Reflect for #name {
            fn reflect(&self) -> ::flex_api::reflect::Reflected<'_> {
                ::flex_api::reflect::Reflected::Struct(self)
            }

            fn reflect_mut(&mut self) -> ::flex_api::reflect::ReflectedMut<'_> {
                ::flex_api::reflect::ReflectedMut::Struct(self)
            }
        }
    }
}
