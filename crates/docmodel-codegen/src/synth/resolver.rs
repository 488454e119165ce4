use super::{names::LevelNames, names::MAX_LEVELS, OutputField};
use crate::{
    ir::{Body, Expr, Method, Origin, Param, Receiver, Stmt},
    schema::{Chain, Field, LinkKind, Model, Shape},
    CodegenError, Result,
};

use proc_macro2::Span;
use syn::parse_quote;

/// Resolver method of one reference field, with the slots it caches into.
#[derive(Debug, Clone)]
pub struct Resolver {
    pub method: Method,

    /// `err_<field>`, `init_<field>` and `resolved_<field>`
    pub slots: Vec<OutputField>,

    /// Declared type rewritten to hold identifiers
    pub field_ty: syn::Type,
}

struct Synth<'a> {
    runtime: &'a syn::Path,
    chain: Chain,
    levels: Vec<LevelNames>,
    db: syn::Ident,
    err: syn::Ident,
    init: syn::Ident,
    resolved: syn::Ident,
}

pub(crate) fn synthesize(
    model: &Model,
    field: &Field,
    runtime: &syn::Path,
    id_ty: &syn::Type,
) -> Result<Resolver> {
    let depth = field.shape.depth();
    let levels = (0..depth)
        .map(|level| {
            LevelNames::new(level).ok_or_else(|| CodegenError::NestingTooDeep {
                model: model.name.text.clone(),
                field: field.name.text.clone(),
                depth,
                max: MAX_LEVELS,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let Shape::Named { ty: target, .. } = field.shape.terminal() else {
        return Err(CodegenError::UnsupportedType {
            model: model.name.text.clone(),
            field: field.name.text.clone(),
            ty: quote::ToTokens::to_token_stream(&field.ty).to_string(),
        });
    };

    let chain = Chain::build(&field.shape, target, id_ty);
    let root = chain.root();
    let resolved_ty = root.resolved_ty.clone();
    let field_ty = root.id_ty.clone();

    let synth = Synth {
        runtime,
        db: syn::Ident::new("db", Span::call_site()),
        err: field.name.prefixed("err_"),
        init: field.name.prefixed("init_"),
        resolved: field.name.prefixed("resolved_"),
        chain,
        levels,
    };

    let mut body = vec![Stmt::If {
        cond: Expr::self_field(&synth.init),
        then: vec![Stmt::Return(synth.result())],
    }];
    body.extend(synth.emit(
        0,
        Expr::self_field(&synth.resolved),
        Expr::self_field(field.ident()),
        &synth.finish(),
    ));
    body.extend(synth.finish());

    let mut attrs = vec![];
    if (0..depth).any(LevelNames::is_upper) {
        attrs.push(parse_quote!(#[allow(non_snake_case)]));
    }

    let method = Method {
        name: field.name.prefixed("get_resolved_"),
        attrs,
        docs: vec![format!(
            " Loads the models referenced by `{}`. The first call performs the lookups; later calls return the cached outcome.",
            field.name.text
        )],
        vis: parse_quote!(pub),
        receiver: Receiver::RefMut,
        params: vec![Param {
            name: synth.db.clone(),
            ty: parse_quote!(&#runtime::Db),
        }],
        ret: Some(resolved_return(runtime, resolved_ty.clone())),
        body: Body::Stmts(body),
        origin: Origin::Synthesized,
    };

    tracing::debug!(
        model = %model.name.text,
        field = %field.name.text,
        levels = synth.chain.len(),
        "synthesized resolver"
    );

    let skip: syn::Attribute = parse_quote!(#[serde(skip)]);
    let slot = |ident: &syn::Ident, ty: syn::Type| OutputField {
        attrs: vec![skip.clone()],
        vis: syn::Visibility::Inherited,
        ident: ident.clone(),
        ty,
        slot: true,
    };

    Ok(Resolver {
        method,
        slots: vec![
            slot(&synth.err, parse_quote!(::core::option::Option<#runtime::Error>)),
            slot(&synth.init, parse_quote!(bool)),
            slot(&synth.resolved, resolved_ty),
        ],
        field_ty,
    })
}

impl Synth<'_> {
    /// Statements for the link at `level`.
    ///
    /// `place` is where the resolved value of this link is written, `source`
    /// holds its identifiers, and `nil` runs when `source` is empty. Inside a
    /// loop `nil` ends with `continue`.
    fn emit(&self, mut level: usize, mut place: Expr, mut source: Expr, nil: &[Stmt]) -> Vec<Stmt> {
        let in_loop = matches!(nil.last(), Some(Stmt::Continue));
        let mut stmts = vec![];

        // Optional layers unwrap one after another without nesting.
        while self
            .chain
            .get(level)
            .is_some_and(|link| matches!(link.kind, LinkKind::Pointer))
        {
            let names = self.names(level);

            stmts.push(Stmt::LetElse {
                name: names.id.clone(),
                scrutinee: source,
                otherwise: nil.to_vec(),
            });
            stmts.push(Stmt::Let {
                name: names.assign.clone(),
                mutable: false,
                ty: None,
                init: place.method("insert", vec![Expr::Default]),
            });

            place = Expr::ident(&names.assign).deref();
            source = Expr::ident(&names.id);
            level += 1;
        }

        let Some(link) = self.chain.get(level) else {
            return stmts;
        };

        match &link.kind {
            LinkKind::Pointer => {}
            LinkKind::Terminal => stmts.extend(self.lookup("find_by_id", in_loop, place, source)),
            LinkKind::Slice => {
                stmts.push(Stmt::If {
                    cond: source.clone().method("is_empty", vec![]),
                    then: nil.to_vec(),
                });

                if self.chain.get(level + 1).is_some_and(|child| child.is_terminal()) {
                    stmts.extend(self.lookup("find_many_by_ids", in_loop, place, source));
                    return stmts;
                }

                let names = self.names(level);
                let default_fn: syn::Path = parse_quote!(::core::default::Default::default);

                stmts.push(Stmt::Assign {
                    place: place.clone(),
                    value: Expr::call(
                        parse_quote!(::std::iter::repeat_with),
                        vec![Expr::Path(default_fn)],
                    )
                    .method("take", vec![source.clone().method("len", vec![])])
                    .method("collect", vec![]),
                });

                stmts.push(Stmt::ForEach {
                    key: names.key.clone(),
                    value: names.value.clone(),
                    iter: source.method("iter", vec![]).method("enumerate", vec![]),
                    body: self.emit(
                        level + 1,
                        place.index(Expr::ident(&names.key)),
                        Expr::ident(&names.value),
                        &[Stmt::Continue],
                    ),
                });
            }
            LinkKind::Map => {
                let names = self.names(level);
                let Some(child) = self.chain.get(level + 1) else {
                    return stmts;
                };

                let insert = Stmt::Expr(place.clone().method(
                    "insert",
                    vec![
                        Expr::ident(&names.key).method("clone", vec![]),
                        Expr::ident(&names.entry),
                    ],
                ));

                let mut body = vec![Stmt::Let {
                    name: names.entry.clone(),
                    mutable: true,
                    ty: Some(child.resolved_ty.clone()),
                    init: Expr::Default,
                }];
                body.extend(self.emit(
                    level + 1,
                    Expr::ident(&names.entry),
                    Expr::ident(&names.value),
                    &[insert.clone(), Stmt::Continue],
                ));
                body.push(insert);

                stmts.extend([
                    Stmt::If {
                        cond: source.clone().method("is_empty", vec![]),
                        then: nil.to_vec(),
                    },
                    Stmt::Assign {
                        place,
                        value: Expr::Default,
                    },
                    Stmt::ForEach {
                        key: names.key.clone(),
                        value: names.value.clone(),
                        iter: source.method("iter", vec![]),
                        body,
                    },
                ]);
            }
        }

        stmts
    }

    /// `self.err_x = runtime::<func>(db, &mut place, &source).err();`,
    /// followed inside loops by an early return on error.
    fn lookup(&self, func: &str, in_loop: bool, place: Expr, source: Expr) -> Vec<Stmt> {
        let runtime = self.runtime;
        let func = syn::Ident::new(func, Span::call_site());

        let mut stmts = vec![Stmt::Assign {
            place: Expr::self_field(&self.err),
            value: Expr::call(
                parse_quote!(#runtime::#func),
                vec![Expr::ident(&self.db), place.by_mut(), source.by_ref()],
            )
            .method("err", vec![]),
        }];

        if in_loop {
            stmts.push(Stmt::If {
                cond: Expr::self_field(&self.err).method("is_some", vec![]),
                then: self.finish(),
            });
        }

        stmts
    }

    /// Marks the field resolved and returns the cached outcome.
    fn finish(&self) -> Vec<Stmt> {
        vec![
            Stmt::Assign {
                place: Expr::self_field(&self.init),
                value: Expr::bool(true),
            },
            Stmt::Return(self.result()),
        ]
    }

    fn result(&self) -> Expr {
        let runtime = self.runtime;
        Expr::call(
            parse_quote!(#runtime::Resolved::new),
            vec![
                Expr::self_field(&self.resolved).by_ref(),
                Expr::self_field(&self.err).method("as_ref", vec![]),
            ],
        )
    }

    fn names(&self, level: usize) -> &LevelNames {
        &self.levels[level]
    }
}

/// `runtime::Resolved<'_, resolved>`, built without reparsing `resolved`.
fn resolved_return(runtime: &syn::Path, resolved: syn::Type) -> syn::Type {
    let mut ty: syn::TypePath = parse_quote!(#runtime::Resolved<'_, ()>);

    if let Some(syn::PathArguments::AngleBracketed(args)) = ty
        .path
        .segments
        .last_mut()
        .map(|segment| &mut segment.arguments)
    {
        if let Some(syn::GenericArgument::Type(slot)) = args.args.last_mut() {
            *slot = resolved;
        }
    }

    syn::Type::Path(ty)
}
