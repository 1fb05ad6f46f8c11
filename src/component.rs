use std::collections::HashMap;

use swc_core::ecma::ast::*;

use crate::config::{ImportSpec, PluginConfig};

/// One factory invocation found in a module.
pub struct ComponentUse<'a> {
    pub call: &'a CallExpr,
    /// The factory export the callee resolves to.
    pub origin: &'a ImportSpec,
}

/// Local bindings of a module that resolve to a known factory export.
///
/// Matching goes through the binding `Id`, so a local that merely shares the
/// factory's name never matches.
#[derive(Default)]
pub struct FactoryBindings {
    named: HashMap<Id, ImportSpec>,
    // namespace local -> source
    namespaces: HashMap<Id, String>,
}

impl FactoryBindings {
    pub fn collect(module: &Module, config: &PluginConfig) -> Self {
        let mut out = Self::default();
        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
                continue;
            };
            if decl.type_only {
                continue;
            }
            let source = decl.src.value.to_string();
            if !config.has_factory_source(&source) {
                continue;
            }
            for s in &decl.specifiers {
                match s {
                    ImportSpecifier::Named(named) if !named.is_type_only => {
                        let imported = match &named.imported {
                            Some(ModuleExportName::Ident(i)) => i.sym.to_string(),
                            Some(ModuleExportName::Str(s)) => s.value.to_string(),
                            None => named.local.sym.to_string(),
                        };
                        if let Some(spec) = config.factory(&source, &imported) {
                            out.named.insert(named.local.to_id(), spec.clone());
                        }
                    }
                    ImportSpecifier::Default(def) => {
                        if let Some(spec) = config.factory(&source, "default") {
                            out.named.insert(def.local.to_id(), spec.clone());
                        }
                    }
                    ImportSpecifier::Namespace(ns) => {
                        out.namespaces.insert(ns.local.to_id(), source.clone());
                    }
                    _ => {}
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.namespaces.is_empty()
    }

    pub fn resolve<'c>(&'c self, callee: &Callee, config: &'c PluginConfig) -> Option<&'c ImportSpec> {
        let Callee::Expr(expr) = callee else {
            return None;
        };
        match &**expr {
            Expr::Ident(i) => self.named.get(&i.to_id()),
            // fk.FormKit(...)
            Expr::Member(m) => {
                let Expr::Ident(obj) = &*m.obj else {
                    return None;
                };
                let source = self.namespaces.get(&obj.to_id())?;
                let name = match &m.prop {
                    MemberProp::Ident(p) => p.sym.to_string(),
                    MemberProp::Computed(c) => match &*c.expr {
                        Expr::Lit(Lit::Str(s)) => s.value.to_string(),
                        _ => return None,
                    },
                    MemberProp::PrivateName(_) => return None,
                };
                config.factory(source, &name)
            }
            _ => None,
        }
    }
}
