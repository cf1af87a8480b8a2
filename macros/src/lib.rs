use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Ident, ItemFn, LitStr};

const USAGE: &str = "pushrx_macro::test only accepts: #[pushrx_macro::test], \
                     #[pushrx_macro::test(local)], #[pushrx_macro::test(shared)], or string \
                     equivalents";

/// Marks a test function and installs a `tracing` subscriber writing to the
/// test output before the body runs. `RUST_LOG` selects what is printed;
/// nothing is printed by default.
///
/// Sync functions become plain `#[test]`s. `async fn`s run on tokio:
/// `local` (the default) uses a current-thread runtime, `shared` a
/// multi-threaded one.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);
  let is_async = input.sig.asyncness.is_some();

  let raw_args = proc_macro2::TokenStream::from(attr);
  let flavor = if raw_args.is_empty() {
    quote!(flavor = "current_thread")
  } else {
    if !is_async {
      return TokenStream::from(
        syn::Error::new(
          raw_args.span(),
          "pushrx_macro::test flavor args are only supported for async tests. Use \
           #[pushrx_macro::test] for sync tests, or make the function async.",
        )
        .to_compile_error(),
      );
    }

    let name = if let Ok(ident) = syn::parse2::<Ident>(raw_args.clone()) {
      Some((ident.to_string(), ident.span()))
    } else if let Ok(lit) = syn::parse2::<LitStr>(raw_args.clone()) {
      Some((lit.value(), lit.span()))
    } else {
      None
    };

    match name {
      Some((name, _)) if name == "local" => quote!(flavor = "current_thread"),
      Some((name, _)) if name == "shared" => quote!(flavor = "multi_thread"),
      Some((_, span)) => {
        return TokenStream::from(syn::Error::new(span, USAGE).to_compile_error());
      }
      None => {
        return TokenStream::from(syn::Error::new(raw_args.span(), USAGE).to_compile_error());
      }
    }
  };

  let test_attr = if is_async { quote!(#[::tokio::test(#flavor)]) } else { quote!(#[test]) };

  let ItemFn { attrs, vis, sig, block } = input;
  let expanded = quote! {
    #test_attr
    #(#attrs)*
    #vis #sig {
      let _ = ::tracing_subscriber::fmt()
        .with_env_filter(
          ::tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| ::tracing_subscriber::EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
      #block
    }
  };

  TokenStream::from(expanded)
}
