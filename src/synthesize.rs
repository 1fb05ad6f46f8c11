use swc_core::{
    common::DUMMY_SP,
    ecma::{ast::*, utils::ExprFactory},
};

use crate::{
    classify::OptimizationDecision, component::ComponentUse, config::PluginConfig,
    imports::ImportRegistry,
};

/// The injected `{ plugins: [...] }` argument.
///
/// Order matters: the bindings plugin is always first.
#[derive(Debug, Clone)]
pub struct ConfigObject {
    plugins: Vec<Ident>,
}

impl ConfigObject {
    pub fn plugins(&self) -> &[Ident] {
        &self.plugins
    }

    pub fn into_expr(self) -> Expr {
        let elems = self
            .plugins
            .into_iter()
            .map(|ident| Some(Box::new(Expr::Ident(ident)).as_arg()))
            .collect();
        Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Ident(IdentName::new("plugins".into(), DUMMY_SP)),
                value: Box::new(Expr::Array(ArrayLit {
                    span: DUMMY_SP,
                    elems,
                })),
            })))],
        })
    }
}

pub fn synthesize(
    component: &ComponentUse,
    decision: &OptimizationDecision,
    config: &PluginConfig,
    imports: &mut ImportRegistry,
) -> ConfigObject {
    let bindings = imports.ensure_import(&config.bindings);
    let library = match decision {
        OptimizationDecision::StaticType(value) => imports.ensure_import(&config.input_spec(value)),
        OptimizationDecision::Dynamic => imports.ensure_import(&config.library_spec()),
    };
    tracing::debug!(
        factory = %component.origin.name,
        from = %component.origin.from,
        decision = ?decision,
        library = %library.sym,
        "synthesized component config"
    );
    ConfigObject {
        plugins: vec![bindings, library],
    }
}
