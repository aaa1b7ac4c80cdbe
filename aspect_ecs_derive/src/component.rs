use proc_macro::TokenStream;
use syn::{parse_quote, DeriveInput, GenericParam};
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let mut generics = ast.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!('static));
            param.bounds.push(parse_quote!(Send));
            param.bounds.push(parse_quote!(Sync));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Each instantiation of a generic type is its own kind.
    let kind_name = match generics.params.is_empty() {
        true => {
            let name_str = name.to_string();
            quote! { #name_str }
        },
        false => quote! { ::std::any::type_name::<Self>() },
    };

    let gen = quote! {
        impl #impl_generics aspect_ecs::components::Component for #name #ty_generics #where_clause {
            #[inline(always)]
            fn kind() -> aspect_ecs::components::ComponentKind {
                aspect_ecs::components::ComponentKind::new(#kind_name)
            }
        }
    };
    gen.into()
}
