use const_random::const_random;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{parse::Parse, spanned::Spanned, visit::Visit, *};

/// What one arm's pattern says about the alternatives it handles.
#[derive(Default)]
struct ArmPat {
    root_ident: Option<syn::PatIdent>,
    is_fallback: bool,
    variants: Vec<Type>,
    variant_pats: Vec<Option<Pat>>,
    binds_in_subpat: bool,

    is_in_subpat: bool,
    err: Option<syn::Error>,
}

impl ArmPat {
    fn check_ty(&mut self, ty: &Type) -> bool {
        if self.variants.iter().any(|d| d == ty) {
            self.err = Some(syn::Error::new_spanned(
                ty,
                "the same alternative is listed twice in one arm",
            ));
            return false;
        }
        true
    }

    fn check_ty_with_other(&self, other: &Self) -> Option<syn::Error> {
        self.variants.iter().find_map(|d| {
            other.variants.iter().any(|e| d == e).then(|| {
                syn::Error::new_spanned(d, "this alternative is already matched by an earlier arm")
            })
        })
    }

    fn push_ty(&mut self, ty: Type, pat: Option<&Pat>) {
        self.variants.push(ty);
        self.variant_pats.push(pat.cloned());
    }

    fn unsupported(&mut self, i: &Pat, what: &str) {
        self.err = Some(syn::Error::new_spanned(
            i,
            format!(
                "{what} pattern `{}` is not supported; alternatives are matched by type",
                i.to_token_stream()
            ),
        ));
    }
}

impl Visit<'_> for ArmPat {
    fn visit_pat(&mut self, i: &'_ syn::Pat) {
        if self.err.is_some() {
            return;
        }

        if self.is_in_subpat {
            match i {
                Pat::Ident(_) => self.binds_in_subpat = true,
                Pat::Lit(_) | Pat::Range(_) | Pat::Const(_) => {
                    return self.unsupported(i, "refutable");
                }
                _ => {}
            }
            return visit::visit_pat(self, i);
        }

        match i {
            Pat::Ident(pi) => {
                if let Some((_, subpat)) = &pi.subpat {
                    let mut pat_ident = pi.clone();
                    pat_ident.subpat = None;
                    self.root_ident = Some(pat_ident);
                    return self.visit_pat(subpat);
                }

                if starts_uppercase(&pi.ident) {
                    let ty = Type::Path(syn::TypePath {
                        qself: None,
                        path: syn::Path::from(pi.ident.clone()),
                    });
                    if self.check_ty(&ty) {
                        self.push_ty(ty, None);
                    }
                } else {
                    self.is_fallback = true;
                    self.root_ident = Some(pi.clone());
                }
            }

            Pat::Struct(syn::PatStruct { qself, path, .. })
            | Pat::TupleStruct(syn::PatTupleStruct { qself, path, .. }) => {
                let ty = Type::Path(syn::TypePath {
                    qself: qself.clone(),
                    path: path.clone(),
                });

                if self.check_ty(&ty) {
                    self.is_in_subpat = true;
                    visit::visit_pat(self, i);
                    self.is_in_subpat = false;

                    self.push_ty(ty, Some(i));
                }
            }

            Pat::Path(syn::PatPath { qself, path, .. }) => {
                let ty = Type::Path(syn::TypePath {
                    qself: qself.clone(),
                    path: path.clone(),
                });
                if self.check_ty(&ty) {
                    self.push_ty(ty, None);
                }
            }

            Pat::Paren(_) | Pat::Or(_) => visit::visit_pat(self, i),

            Pat::Wild(_) => self.is_fallback = true,

            Pat::Lit(_) | Pat::Range(_) | Pat::Const(_) => self.unsupported(i, "value"),

            _ => self.unsupported(i, "this"),
        }
    }
}

/// Type names start with an uppercase letter, bindings do not. Acronyms such
/// as `RGB` are types too.
fn starts_uppercase(ident: &Ident) -> bool {
    ident
        .to_string()
        .trim_start_matches("r#")
        .starts_with(|c: char| c.is_uppercase())
}

/// How one arm turns into a builder call.
enum ArmKind {
    Single {
        ty: Type,
        binding: Option<PatIdent>,
        destructure: Option<Pat>,
    },
    Group {
        tys: Vec<Type>,
        binding: Option<PatIdent>,
    },
    Fallback {
        binding: Option<PatIdent>,
    },
}

pub struct SwitchArm {
    pat: ArmPat,
    source: Pat,
    kind: ArmKind,
    body: Box<Expr>,
}

impl Parse for SwitchArm {
    fn parse(input: syn::parse::ParseStream<'_>) -> syn::Result<Self> {
        let syn::Arm {
            attrs,
            pat,
            guard,
            body,
            ..
        } = input.parse()?;

        if let Some(first) = attrs.first() {
            return Err(syn::Error::new(
                first.span(),
                "custom attributes are not supported on switch arms",
            ));
        }

        if let Some((if_token, cond)) = guard {
            let span = if_token.span.join(cond.span()).unwrap_or(if_token.span);
            return Err(syn::Error::new(
                span,
                "guards are not supported; alternatives are matched by type, not by value",
            ));
        }

        let mut arm_pat = ArmPat::default();
        arm_pat.visit_pat(&pat);

        if let Some(err) = arm_pat.err.take() {
            return Err(err);
        }

        let kind = match (arm_pat.is_fallback, arm_pat.variants.len()) {
            (true, 0) => ArmKind::Fallback {
                binding: arm_pat.root_ident.clone(),
            },
            (true, _) => {
                return Err(syn::Error::new_spanned(
                    &pat,
                    "a fallback arm cannot also name alternatives",
                ));
            }
            (false, 0) => {
                return Err(syn::Error::new_spanned(
                    &pat,
                    "cannot infer the alternative; name its type in the pattern",
                ));
            }
            (false, 1) => ArmKind::Single {
                ty: arm_pat.variants[0].clone(),
                binding: arm_pat.root_ident.clone(),
                destructure: arm_pat.variant_pats[0].clone(),
            },
            (false, _) if arm_pat.binds_in_subpat => {
                return Err(syn::Error::new_spanned(
                    &pat,
                    "bindings inside grouped alternatives are not supported; \
                     bind the whole group with `name @ (A | B)`",
                ));
            }
            (false, _) => ArmKind::Group {
                tys: arm_pat.variants.clone(),
                binding: arm_pat.root_ident.clone(),
            },
        };

        Ok(SwitchArm {
            pat: arm_pat,
            source: pat,
            kind,
            body,
        })
    }
}

pub struct Switch {
    expr: Box<Expr>,
    arms: Vec<SwitchArm>,
}

impl Parse for Switch {
    fn parse(input: syn::parse::ParseStream<'_>) -> syn::Result<Self> {
        let expr = Box::new(Expr::parse_without_eager_brace(input)?);

        let content;
        syn::braced!(content in input);

        let mut arms = Vec::new();
        while !content.is_empty() {
            arms.push(content.parse()?);
        }

        Ok(Switch { expr, arms })
    }
}

fn expand_arm(arm: &SwitchArm, value: &Ident) -> TokenStream {
    let body = &arm.body;
    match &arm.kind {
        ArmKind::Single {
            ty,
            binding,
            destructure,
        } => {
            let handler = match (binding, destructure) {
                (None, None) => quote!(|| { #body }),
                (Some(binding), None) => quote!(|#binding: #ty| { #body }),
                (binding, Some(pat)) => {
                    let pat = match binding {
                        Some(binding) => quote!(#binding @ #pat),
                        None => pat.to_token_stream(),
                    };
                    quote!(|#value: #ty| {
                        let #pat = #value;
                        #body
                    })
                }
            };
            quote!(.when::<#ty, _, _>(#handler))
        }
        ArmKind::Group { tys, binding } => {
            let handler = match binding {
                None => quote!(|| { #body }),
                Some(binding) => quote!(|#binding: ::switcheroo::Sum![#(#tys),*]| { #body }),
            };
            quote!(.when_any::<::switcheroo::T![#(#tys),*], _, _>(#handler))
        }
        ArmKind::Fallback { binding: None } => quote!(.otherwise(|| { #body })),
        ArmKind::Fallback {
            binding: Some(binding),
        } => quote!(.otherwise_with(|#binding| { #body })),
    }
}

pub fn expand_switch(data: Switch) -> TokenStream {
    let Switch { expr, arms } = data;
    let value = format_ident!("__switch_value{}", const_random!(u32));

    if let Some(err) = (arms.iter().enumerate())
        .flat_map(|(index, a)| arms.iter().take(index).map(move |b| (a, b)))
        .find_map(|(a, b)| a.pat.check_ty_with_other(&b.pat))
    {
        return err.to_compile_error();
    }

    let first_fallback = arms
        .iter()
        .position(|arm| matches!(arm.kind, ArmKind::Fallback { .. }));
    if let Some(unreachable) = first_fallback.and_then(|index| arms.get(index + 1)) {
        return syn::Error::new_spanned(
            &unreachable.source,
            "unreachable arm: the fallback arm before it already matches every remaining alternative",
        )
        .to_compile_error();
    }

    let calls = arms.iter().map(|arm| expand_arm(arm, &value));

    quote! {
        ::switcheroo::match_on(#expr)
            #(#calls)*
            .run()
    }
}
