use std::sync::Arc;

use swc_core::{
    common::{SourceMapper, DUMMY_SP},
    ecma::{
        ast::*,
        utils::ExprFactory,
        visit::{VisitMut, VisitMutWith},
    },
    plugin::{plugin_transform, proxies::TransformPluginProgramMetadata},
};

pub mod classify;
pub mod component;
pub mod config;
pub mod config_file;
pub mod diagnostics;
pub mod error;
pub mod imports;
pub mod synthesize;

#[cfg(test)]
mod test_utils;

pub use classify::{classify, OptimizationDecision};
pub use component::ComponentUse;
pub use config::{ImportSpec, PluginConfig};
pub use config_file::{lookup_config_property, lookup_property};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::ConfigError;
pub use imports::ImportRegistry;
pub use synthesize::{synthesize, ConfigObject};

use component::FactoryBindings;

// -----------------------------------------------------------------------------
// Rewrite driver
// -----------------------------------------------------------------------------

/// Injects a `{ plugins: [...] }` configuration argument into every component
/// factory call of a module.
///
/// Calls are visited in document order. Calls that already carry a third
/// argument are left alone, so running the pass twice changes nothing.
pub struct FormKitOptimizer {
    config: PluginConfig,
    diagnostics: Diagnostics,

    // -------- per module --------
    factories: FactoryBindings,
    imports: Option<ImportRegistry>,
    rewritten: usize,
}

impl FormKitOptimizer {
    pub fn new(config: PluginConfig, source_map: Option<Arc<dyn SourceMapper>>) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(source_map),
            factories: FactoryBindings::default(),
            imports: None,
            rewritten: 0,
        }
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn rewrite_call(&mut self, call: &mut CallExpr) {
        let Some(origin) = self.factories.resolve(&call.callee, &self.config).cloned() else {
            return;
        };
        let Some(imports) = self.imports.as_mut() else {
            return;
        };

        // Already configured, or nothing to configure.
        if call.args.len() > 2 || call.args.is_empty() {
            return;
        }
        if call.args.iter().any(|arg| arg.spread.is_some()) {
            self.diagnostics.warn(
                DiagnosticKind::SpreadArguments,
                call.span,
                "Input arguments are spread, skipping config injection.",
            );
            return;
        }

        let component = ComponentUse {
            call: &*call,
            origin: &origin,
        };
        let decision = classify(
            component.call.args.get(1),
            &self.config.default_type,
            component.call.span,
            &mut self.diagnostics,
        );
        let object = synthesize(&component, &decision, &self.config, imports);

        if call.args.len() == 1 {
            call.args.push(
                Box::new(Expr::Object(ObjectLit {
                    span: DUMMY_SP,
                    props: vec![],
                }))
                .as_arg(),
            );
        }
        call.args.push(Box::new(object.into_expr()).as_arg());
        self.rewritten += 1;
    }
}

impl VisitMut for FormKitOptimizer {
    fn visit_mut_module(&mut self, m: &mut Module) {
        self.factories = FactoryBindings::collect(m, &self.config);
        if self.factories.is_empty() {
            return;
        }
        self.imports = Some(ImportRegistry::new(m));
        self.rewritten = 0;

        m.visit_mut_children_with(self);

        if let Some(mut imports) = self.imports.take() {
            let added = imports.commit(m);
            tracing::debug!(calls = self.rewritten, imports = added, "rewrote component calls");
        }
        self.factories = FactoryBindings::default();
    }

    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        self.rewrite_call(n);
        n.visit_mut_children_with(self);
    }
}

/// Rewrite `module` in place with `config`, returning the advisory diagnostics.
pub fn rewrite_module(module: &mut Module, config: &PluginConfig) -> Vec<Diagnostic> {
    let mut optimizer = FormKitOptimizer::new(config.clone(), None);
    module.visit_mut_with(&mut optimizer);
    optimizer.into_diagnostics().into_records()
}

// -----------------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------------

#[plugin_transform]
pub fn process_transform(mut program: Program, metadata: TransformPluginProgramMetadata) -> Program {
    let raw = metadata.get_transform_plugin_config().unwrap_or_default();
    let config = PluginConfig::from_json(&raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to default FormKit plugin configuration");
        PluginConfig::default()
    });

    let source_map: Option<Arc<dyn SourceMapper>> = Some(Arc::new(metadata.source_map));

    let mut optimizer = FormKitOptimizer::new(config, source_map);
    program.visit_mut_with(&mut optimizer);
    program
}
