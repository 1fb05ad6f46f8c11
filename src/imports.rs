use std::collections::{HashMap, HashSet};

use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};

use crate::config::ImportSpec;

/// Hands out one local binding per [`ImportSpec`] for a single module.
///
/// Existing imports are reused. New ones are queued and land in the module on
/// [`ImportRegistry::commit`], right after the last import statement already there.
pub struct ImportRegistry {
    known: HashMap<ImportSpec, Ident>,
    taken: HashSet<String>,
    pending: Vec<ModuleItem>,
}

impl ImportRegistry {
    pub fn new(module: &Module) -> Self {
        let mut bound = HashMap::new();
        module.visit_with(&mut BindingCounter { out: &mut bound });

        let mut known = HashMap::new();
        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
                continue;
            };
            if decl.type_only {
                continue;
            }
            for s in &decl.specifiers {
                if let ImportSpecifier::Named(named) = s {
                    // A local bound again anywhere else may be shadowed at the call site.
                    if named.is_type_only || bound.get(&*named.local.sym).copied() != Some(1) {
                        continue;
                    }
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(i)) => i.sym.to_string(),
                        Some(ModuleExportName::Str(s)) => s.value.to_string(),
                        None => named.local.sym.to_string(),
                    };
                    known
                        .entry(ImportSpec::new(decl.src.value.to_string(), imported))
                        .or_insert_with(|| named.local.clone());
                }
            }
        }

        let mut taken = HashSet::new();
        module.visit_with(&mut NameCollector { out: &mut taken });

        Self {
            known,
            taken,
            pending: vec![],
        }
    }

    /// Local identifier bound to `spec`, queueing an import if none exists yet.
    pub fn ensure_import(&mut self, spec: &ImportSpec) -> Ident {
        if let Some(local) = self.known.get(spec) {
            return local.clone();
        }

        let local = self.fresh_ident(&spec.name);
        let imported = if is_identifier(&spec.name) {
            (spec.name.as_str() != &*local.sym).then(|| {
                ModuleExportName::Ident(Ident::new(
                    spec.name.clone().into(),
                    DUMMY_SP,
                    SyntaxContext::empty(),
                ))
            })
        } else {
            Some(ModuleExportName::Str(Str {
                span: DUMMY_SP,
                value: spec.name.clone().into(),
                raw: None,
            }))
        };

        self.pending
            .push(ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
                span: DUMMY_SP,
                specifiers: vec![ImportSpecifier::Named(ImportNamedSpecifier {
                    span: DUMMY_SP,
                    local: local.clone(),
                    imported,
                    is_type_only: false,
                })],
                src: Box::new(Str {
                    span: DUMMY_SP,
                    value: spec.from.clone().into(),
                    raw: None,
                }),
                type_only: false,
                with: None,
                phase: ImportPhase::Evaluation,
            })));
        self.known.insert(spec.clone(), local.clone());
        local
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Splice queued imports into `module`. Returns how many were added.
    pub fn commit(&mut self, module: &mut Module) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let at = module
            .body
            .iter()
            .rposition(|item| matches!(item, ModuleItem::ModuleDecl(ModuleDecl::Import(_))))
            .map_or(0, |i| i + 1);
        let added = self.pending.len();
        module.body.splice(at..at, self.pending.drain(..));
        added
    }

    fn fresh_ident(&mut self, base: &str) -> Ident {
        let base = sanitize(base);
        let mut candidate = base.clone();
        let mut n = 1;
        while self.taken.contains(&candidate) {
            n += 1;
            candidate = format!("{base}{n}");
        }
        self.taken.insert(candidate.clone());
        Ident::new(candidate.into(), DUMMY_SP, SyntaxContext::empty())
    }
}

/// Every identifier spelled anywhere in the module. A fresh name outside this
/// set can neither shadow nor be shadowed.
struct NameCollector<'a> {
    out: &'a mut HashSet<String>,
}

impl Visit for NameCollector<'_> {
    fn visit_ident(&mut self, i: &Ident) {
        self.out.insert(i.sym.to_string());
    }
}

/// How often each name is bound, in any scope.
struct BindingCounter<'a> {
    out: &'a mut HashMap<String, usize>,
}

impl BindingCounter<'_> {
    fn bind(&mut self, i: &Ident) {
        *self.out.entry(i.sym.to_string()).or_default() += 1;
    }
}

impl Visit for BindingCounter<'_> {
    fn visit_binding_ident(&mut self, n: &BindingIdent) {
        self.bind(&n.id);
        n.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, n: &FnDecl) {
        self.bind(&n.ident);
        n.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, n: &ClassDecl) {
        self.bind(&n.ident);
        n.visit_children_with(self);
    }

    fn visit_fn_expr(&mut self, n: &FnExpr) {
        if let Some(ident) = &n.ident {
            self.bind(ident);
        }
        n.visit_children_with(self);
    }

    fn visit_class_expr(&mut self, n: &ClassExpr) {
        if let Some(ident) = &n.ident {
            self.bind(ident);
        }
        n.visit_children_with(self);
    }

    fn visit_import_specifier(&mut self, n: &ImportSpecifier) {
        match n {
            ImportSpecifier::Named(named) => self.bind(&named.local),
            ImportSpecifier::Default(def) => self.bind(&def.local),
            ImportSpecifier::Namespace(ns) => self.bind(&ns.local),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric()) && !is_reserved(s)
}

fn is_reserved(s: &str) -> bool {
    matches!(
        s,
        "await"
            | "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "instanceof"
            | "interface"
            | "let"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "static"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "arguments"
            | "eval"
    )
}

fn sanitize(name: &str) -> String {
    if is_identifier(name) {
        return name.to_string();
    }
    let mut out: String = name
        .chars()
        .map(|c| if c == '$' || c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if !out.starts_with(|c: char| c == '_' || c == '$' || c.is_ascii_alphabetic()) {
        out.insert(0, '_');
    }
    if is_reserved(&out) {
        out.insert(0, '_');
    }
    out
}
