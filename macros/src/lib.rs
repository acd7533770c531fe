use proc_macro::TokenStream;

mod pat;

/// Matches on a `Sum` with `match`-like arms.
///
/// Each arm names the alternative it handles by type:
///
/// - `Red => ..` ignores the value, `r @ Red => ..` binds it and
///   `Red { field, .. } => ..` destructures it;
/// - `Red | Blue => ..` handles a group, `g @ (Red | Blue) => ..` binds the
///   narrowed value;
/// - `_ => ..` or `other => ..` handles every alternative not matched by an
///   earlier arm, and must come last.
///
/// The arms expand to a `match_on(..).when(..)...run()` chain, so all of its
/// compile-time checks apply. Arm bodies become closures: `return` and `?`
/// leave the arm, not the enclosing function.
#[proc_macro]
pub fn switch(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as pat::Switch);
    pat::expand_switch(input).into()
}
