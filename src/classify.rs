use swc_core::{
    common::Span,
    ecma::ast::*,
};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationDecision {
    /// The input type is known at compile time.
    StaticType(String),
    Dynamic,
}

/// What the properties argument says about `type`, judged by node kind only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSource {
    Absent,
    Literal(String),
    /// Present, but not a string literal.
    Bound,
    /// The properties have no static shape, `type` may come from anywhere.
    Unknown,
}

pub fn inspect_type(props: Option<&ExprOrSpread>) -> TypeSource {
    let Some(arg) = props else {
        return TypeSource::Absent;
    };
    if arg.spread.is_some() {
        return TypeSource::Unknown;
    }
    let Expr::Object(obj) = unwrap_parens(&arg.expr) else {
        return TypeSource::Unknown;
    };

    // Later definitions win, same as evaluating the literal.
    let mut source = TypeSource::Absent;
    for prop in &obj.props {
        let prop = match prop {
            PropOrSpread::Spread(_) => {
                source = TypeSource::Unknown;
                continue;
            }
            PropOrSpread::Prop(p) => &**p,
        };
        match prop {
            Prop::KeyValue(kv) => match key_name(&kv.key) {
                Key::Type => {
                    source = match unwrap_parens(&kv.value) {
                        Expr::Lit(Lit::Str(s)) => TypeSource::Literal(s.value.to_string()),
                        _ => TypeSource::Bound,
                    }
                }
                Key::Computed => source = TypeSource::Unknown,
                Key::Other => {}
            },
            Prop::Shorthand(i) if &*i.sym == "type" => source = TypeSource::Bound,
            Prop::Getter(GetterProp { key, .. })
            | Prop::Setter(SetterProp { key, .. })
            | Prop::Method(MethodProp { key, .. }) => match key_name(key) {
                Key::Type => source = TypeSource::Bound,
                Key::Computed => source = TypeSource::Unknown,
                Key::Other => {}
            },
            _ => {}
        }
    }
    source
}

/// Decide how the call is configured; de-optimizations are reported, never fatal.
pub fn classify(
    props: Option<&ExprOrSpread>,
    default_type: &str,
    site: Span,
    diagnostics: &mut Diagnostics,
) -> OptimizationDecision {
    match inspect_type(props) {
        TypeSource::Absent => OptimizationDecision::StaticType(default_type.to_string()),
        TypeSource::Literal(value) => OptimizationDecision::StaticType(value),
        TypeSource::Bound => {
            diagnostics.warn(
                DiagnosticKind::BoundType,
                site,
                "Input uses a bound type expression, skipping optimization.",
            );
            OptimizationDecision::Dynamic
        }
        TypeSource::Unknown => {
            diagnostics.warn(
                DiagnosticKind::UnknownProps,
                site,
                "Input props are not a static object literal, skipping optimization.",
            );
            OptimizationDecision::Dynamic
        }
    }
}

enum Key {
    Type,
    Other,
    Computed,
}

fn key_name(key: &PropName) -> Key {
    let is_type = match key {
        PropName::Ident(i) => &*i.sym == "type",
        PropName::Str(s) => &*s.value == "type",
        PropName::Computed(c) => match unwrap_parens(&c.expr) {
            Expr::Lit(Lit::Str(s)) => &*s.value == "type",
            Expr::Lit(_) => false,
            _ => return Key::Computed,
        },
        _ => false,
    };
    if is_type {
        Key::Type
    } else {
        Key::Other
    }
}

fn unwrap_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(p) = expr {
        expr = &*p.expr;
    }
    expr
}
