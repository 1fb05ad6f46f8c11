use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Mark, SourceMap};
use swc_core::ecma::ast::{
    CallExpr, Expr, ImportSpecifier, Module, ModuleDecl, ModuleExportName, ModuleItem,
};
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::{Visit, VisitMutWith, VisitWith};

pub fn parse_module(code: &str) -> (Module, Lrc<SourceMap>) {
    parse_with(code, Syntax::Es(EsSyntax::default()))
}

pub fn parse_typescript(code: &str) -> (Module, Lrc<SourceMap>) {
    parse_with(code, Syntax::Typescript(TsSyntax::default()))
}

fn parse_with(code: &str, syntax: Syntax) -> (Module, Lrc<SourceMap>) {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom("test.js".into())),
        code.to_string(),
    );
    let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module().expect("failed to parse module");
    assert!(parser.take_errors().is_empty());
    (module, cm)
}

pub fn print_module(cm: &Lrc<SourceMap>, module: &Module) -> String {
    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: Config::default(),
            comments: None,
            cm: cm.clone(),
            wr: writer,
        };
        emitter
            .emit_module(module)
            .expect("failed to emit module");
    }
    String::from_utf8(buf).expect("module is not valid UTF-8")
}

/// Run the scope resolver so shadowed bindings get their own syntax context.
/// Must be called inside `GLOBALS.set`.
pub fn resolve(module: &mut Module) {
    let unresolved = Mark::new();
    let top_level = Mark::new();
    module.visit_mut_with(&mut resolver(unresolved, top_level, false));
}

/// `(source, imported, local)` for every import specifier, in order.
pub fn imports_of(module: &Module) -> Vec<(String, String, String)> {
    let mut out = vec![];
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
            continue;
        };
        let source = decl.src.value.to_string();
        for s in &decl.specifiers {
            let (imported, local) = match s {
                ImportSpecifier::Named(named) => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(i)) => i.sym.to_string(),
                        Some(ModuleExportName::Str(s)) => s.value.to_string(),
                        None => named.local.sym.to_string(),
                    };
                    (imported, named.local.sym.to_string())
                }
                ImportSpecifier::Default(def) => ("default".to_string(), def.local.sym.to_string()),
                ImportSpecifier::Namespace(ns) => ("*".to_string(), ns.local.sym.to_string()),
            };
            out.push((source.clone(), imported, local));
        }
    }
    out
}

/// Every call expression in document order.
pub fn calls_of(module: &Module) -> Vec<CallExpr> {
    struct Calls(Vec<CallExpr>);
    impl Visit for Calls {
        fn visit_call_expr(&mut self, n: &CallExpr) {
            self.0.push(n.clone());
            n.visit_children_with(self);
        }
    }
    let mut calls = Calls(vec![]);
    module.visit_with(&mut calls);
    calls.0
}

pub fn first_call(module: &Module) -> CallExpr {
    calls_of(module)
        .into_iter()
        .next()
        .expect("module has no call expression")
}

/// Names inside the injected `plugins` array of a rewritten call.
pub fn plugin_names(call: &CallExpr) -> Vec<String> {
    let config = call.args.get(2).expect("call has no config argument");
    let Expr::Object(obj) = &*config.expr else {
        panic!("config argument is not an object literal");
    };
    assert_eq!(obj.props.len(), 1);
    let prop = obj.props[0].as_prop().expect("expected a property");
    let kv = prop.as_key_value().expect("expected a key/value property");
    assert_eq!(kv.key.as_ident().map(|i| i.sym.to_string()).as_deref(), Some("plugins"));
    let Expr::Array(array) = &*kv.value else {
        panic!("plugins is not an array");
    };
    array
        .elems
        .iter()
        .map(|e| match e.as_ref().map(|e| &*e.expr) {
            Some(Expr::Ident(i)) => i.sym.to_string(),
            _ => panic!("plugins must be identifiers"),
        })
        .collect()
}
