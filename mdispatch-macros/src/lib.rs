use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Member, Type, parse_macro_input};

/// Derive macro for implementing `Scope`.
///
/// Each capability is taken from the field tagged with it, and the output type
/// is given on the struct:
///
/// ```rust,ignore
/// #[derive(Scope)]
/// #[scope(output = String)]
/// struct AppScope {
///     #[scope(request)]
///     req: MyRequest,
///     #[scope(response)]
///     res: MyResponse,
///     #[scope(env)]
///     env: HashMap<String, String>,
///     #[scope(session)]
///     session: HashMap<String, String>,
///     // untagged fields are left alone
///     db: Pool,
/// }
/// ```
#[proc_macro_derive(Scope, attributes(scope))]
pub fn derive_scope(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_scope(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

struct Capability<'a> {
    member: Member,
    ty: &'a Type,
}

#[derive(Default)]
struct Capabilities<'a> {
    request: Option<Capability<'a>>,
    response: Option<Capability<'a>>,
    env: Option<Capability<'a>>,
    session: Option<Capability<'a>>,
}

fn expand_scope(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let output = parse_output(input)?;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Scope can only be derived for structs",
            ));
        }
    };

    let caps = collect_capabilities(fields)?;
    let request = require(caps.request, "request", input)?;
    let response = require(caps.response, "response", input)?;
    let env = require(caps.env, "env", input)?;
    let session = require(caps.session, "session", input)?;

    let (request_member, request_ty) = (&request.member, request.ty);
    let (response_member, response_ty) = (&response.member, response.ty);
    let (env_member, env_ty) = (&env.member, env.ty);
    let (session_member, session_ty) = (&session.member, session.ty);

    Ok(quote! {
        impl #impl_generics ::mdispatch::Scope for #name #ty_generics #where_clause {
            type Request = #request_ty;
            type Response = #response_ty;
            type Env = #env_ty;
            type Session = #session_ty;
            type Output = #output;

            fn request(&mut self) -> &mut Self::Request {
                &mut self.#request_member
            }

            fn response(&mut self) -> &mut Self::Response {
                &mut self.#response_member
            }

            fn env(&self) -> &Self::Env {
                &self.#env_member
            }

            fn session(&mut self) -> &mut Self::Session {
                &mut self.#session_member
            }
        }
    })
}

fn parse_output(input: &DeriveInput) -> syn::Result<Type> {
    let mut output = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("scope")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("output") {
                output = Some(meta.value()?.parse::<Type>()?);
                Ok(())
            } else {
                Err(meta.error("unknown scope attribute, expected `output = Type`"))
            }
        })?;
    }
    output.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "missing `#[scope(output = Type)]` on the struct",
        )
    })
}

fn collect_capabilities(fields: &Fields) -> syn::Result<Capabilities<'_>> {
    let mut caps = Capabilities::default();

    for (index, field) in fields.iter().enumerate() {
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(index.into()),
        };

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("scope")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("request") {
                    &mut caps.request
                } else if meta.path.is_ident("response") {
                    &mut caps.response
                } else if meta.path.is_ident("env") {
                    &mut caps.env
                } else if meta.path.is_ident("session") {
                    &mut caps.session
                } else {
                    return Err(meta.error(
                        "unknown capability, expected `request`, `response`, `env` or `session`",
                    ));
                };

                if slot.is_some() {
                    return Err(meta.error("capability is already bound to another field"));
                }
                *slot = Some(Capability {
                    member: member.clone(),
                    ty: &field.ty,
                });
                Ok(())
            })?;
        }
    }

    Ok(caps)
}

fn require<'a>(
    cap: Option<Capability<'a>>,
    which: &str,
    input: &DeriveInput,
) -> syn::Result<Capability<'a>> {
    cap.ok_or_else(|| {
        let ident: &Ident = &input.ident;
        syn::Error::new(
            ident.span(),
            format!("no field is tagged `#[scope({})]`", which),
        )
    })
}
