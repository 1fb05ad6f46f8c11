use swc_core::{
    common::Span,
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};

use crate::{
    config::PluginConfig,
    diagnostics::{DiagnosticKind, Diagnostics},
};

/// Look up `key` in the object literal passed to `function_name(...)` in a
/// configuration module.
///
/// The first such call in document order is authoritative. No call at all is
/// the common case and is silent; a call with anything but an object literal
/// yields nothing and one warning.
pub fn lookup_property(
    config_module: &Program,
    function_name: &str,
    key: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Box<Expr>> {
    let mut finder = DefineCallFinder {
        function_name,
        found: None,
    };
    config_module.visit_with(&mut finder);
    let found = finder.found?;

    let obj = match found.arg {
        Some(ExprOrSpread { spread: None, expr }) => match *expr {
            Expr::Object(obj) => obj,
            _ => return non_literal(diagnostics, found.span, function_name),
        },
        _ => return non_literal(diagnostics, found.span, function_name),
    };

    obj.props.into_iter().rev().find_map(|prop| match prop {
        PropOrSpread::Prop(p) => match *p {
            Prop::KeyValue(kv) if prop_key(&kv.key) == Some(key) => Some(kv.value),
            Prop::Shorthand(i) if &*i.sym == key => Some(Box::new(Expr::Ident(i))),
            _ => None,
        },
        PropOrSpread::Spread(_) => None,
    })
}

/// [`lookup_property`] with the configuration-definition function named in `config`.
pub fn lookup_config_property(
    config_module: &Program,
    config: &PluginConfig,
    key: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Box<Expr>> {
    lookup_property(config_module, &config.config_function, key, diagnostics)
}

fn non_literal(diagnostics: &mut Diagnostics, span: Span, function_name: &str) -> Option<Box<Expr>> {
    diagnostics.warn(
        DiagnosticKind::NonLiteralConfig,
        span,
        &format!("call {function_name} with an object literal to enable optimizations."),
    );
    None
}

fn prop_key(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(i) => Some(&*i.sym),
        PropName::Str(s) => Some(&*s.value),
        _ => None,
    }
}

struct Found {
    span: Span,
    arg: Option<ExprOrSpread>,
}

struct DefineCallFinder<'a> {
    function_name: &'a str,
    found: Option<Found>,
}

impl Visit for DefineCallFinder<'_> {
    fn visit_call_expr(&mut self, n: &CallExpr) {
        if self.found.is_some() {
            return;
        }
        if let Callee::Expr(callee) = &n.callee {
            if let Expr::Ident(id) = &**callee {
                if &*id.sym == self.function_name {
                    self.found = Some(Found {
                        span: n.span,
                        arg: n.args.first().cloned(),
                    });
                    return;
                }
            }
        }
        n.visit_children_with(self);
    }
}
