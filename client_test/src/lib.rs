use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, FnArg, Ident, ItemFn, Pat, Signature, Type};

/// Transform an asynchronous test into a synchronous one that runs against a
/// fresh mock of the election API, and make sure the mock is shut down however
/// the test ends.
///
/// Injectable arguments are `ApiClient` (pointed at the mock), `MockApi` and
/// `Session`. `#[client_test(admin)]` and `#[client_test(voter)]` sign the
/// session in before the test starts.
#[proc_macro_attribute]
pub fn client_test(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut item_fn = parse_macro_input!(input as ItemFn);

    // Extract the arguments to inject and reject invalid signatures.
    let test_args = match check_sig(&item_fn.sig) {
        Ok(args) => args,
        Err(err) => return err.into_compile_error().into(),
    };

    // Rename the future so the test can have its original name.
    let name = item_fn.sig.ident.clone();
    let new_name = format_ident!("{}_fut", name);
    item_fn.sig.ident = new_name.clone();

    let login = match parse_macro_input!(args as Option<Ident>) {
        Some(role) if role == "admin" => quote! {
            session
                .sign_in_admin(&api, &crate::model::api::AdminCredentials::example())
                .await
                .unwrap();
        },
        Some(role) if role == "voter" => quote! {
            mock.issue_code("VOTE0001");
            session.sign_in_voter(&api, "VOTE0001").await.unwrap();
        },
        Some(role) => {
            return syn::Error::new(role.span(), "Expected `admin` or `voter`")
                .into_compile_error()
                .into()
        }
        None => TokenStream2::new(),
    };

    quote! {
        #[test]
        #[allow(unused_variables)]
        fn #name() {
            log4rs_test_utils::test_logging::init_logging_once_for(["election_client"], None, None);

            /// Sign the session in as the test asks.
            async fn setup(mock: crate::mock::MockApi) -> (crate::api::ApiClient, crate::session::Session) {
                let api = crate::api::ApiClient::with_client(reqwest::Client::new(), mock.url());
                #[allow(unused_mut)]
                let mut session = crate::session::Session::new();

                #login

                (api, session)
            }

            /// The test itself.
            #item_fn

            // The mock is served from its own runtime, so it keeps answering
            // while the test runs and after the test panics.
            let server_runtime = tokio::runtime::Builder::new_multi_thread()
                .thread_name("mock-api")
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            let test_runtime = tokio::runtime::Builder::new_multi_thread()
                .thread_name("client-test")
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();

            let mock = server_runtime.block_on(crate::mock::MockApi::launch());
            let (api, session) = test_runtime.block_on(setup(mock.clone()));

            let handle = mock.clone();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                test_runtime.block_on(#new_name(#(#test_args),*));
            }));

            handle.shutdown();
            drop(test_runtime);
            drop(server_runtime);

            if let Err(cause) = result {
                std::panic::resume_unwind(cause);
            }
        }
    }
    .into()
}

/// Ensure the wrapped test is async and map each parameter to the value
/// injected for it.
fn check_sig(sig: &Signature) -> Result<Vec<TokenStream2>, syn::Error> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new(sig.span(), "Test must be marked `async`"));
    }

    let mut seen: Vec<String> = vec![];
    let mut args = vec![];

    for input in &sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let (Pat::Ident(_), Type::Path(type_path)) = (&*pat_type.pat, &*pat_type.ty) {
                if let Some(type_ident) = type_path.path.segments.last().map(|s| &s.ident) {
                    let injected = if type_ident == "ApiClient" {
                        Some(quote! { api.clone() })
                    } else if type_ident == "MockApi" {
                        Some(quote! { mock.clone() })
                    } else if type_ident == "Session" {
                        Some(quote! { session.clone() })
                    } else {
                        None
                    };
                    if let Some(injected) = injected {
                        let type_name = type_ident.to_string();
                        if seen.contains(&type_name) {
                            return Err(syn::Error::new(
                                input.span(),
                                format!("Test cannot accept more than one `{type_name}`"),
                            ));
                        }
                        seen.push(type_name);
                        args.push(injected);
                        continue;
                    }
                }
            }
        }

        return Err(syn::Error::new(
            input.span(),
            "Expected one of `api: ApiClient`, `mock: MockApi` or `session: Session`",
        ));
    }

    Ok(args)
}
