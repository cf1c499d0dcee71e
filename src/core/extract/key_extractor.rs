//! AST visitor that collects translation key usages from one source file.
//!
//! Recognised call sites:
//! - hook declarations: `useTranslation("calc/health")`,
//!   `useTranslation(["calc/health", "common"])` (first element wins)
//! - translation calls: `t("bmi.title")`, `i18n.t("ns:key")`
//!
//! This is call-site matching over a real parse tree, not type analysis: a
//! function named `t` that is not a translation function still counts, and
//! a translation function under another name is missed unless configured.

use std::collections::HashSet;

use swc_common::{Loc, SourceMap};
use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit, MemberProp};
use swc_ecma_visit::{Visit, VisitWith};

use super::ExtractOptions;
use crate::core::{DynamicKey, DynamicKeyReason, KeyUsage};

/// Evaluate an expression to a string if it is statically known.
///
/// Accepts string literals, template literals whose interpolations are
/// themselves static, `+` concatenations and parentheses.
pub fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) => {
            let mut value = String::new();
            for (i, quasi) in tpl.quasis.iter().enumerate() {
                value.push_str(quasi.cooked.as_ref()?.as_str()?);
                if let Some(expr) = tpl.exprs.get(i) {
                    value.push_str(&static_string(expr)?);
                }
            }
            Some(value)
        }
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut value = static_string(&bin.left)?;
            value.push_str(&static_string(&bin.right)?);
            Some(value)
        }
        Expr::Paren(paren) => static_string(&paren.expr),
        Expr::TsAs(ts_as) => static_string(&ts_as.expr),
        Expr::TsConstAssertion(assertion) => static_string(&assertion.expr),
        _ => None,
    }
}

fn dynamic_reason(expr: &Expr) -> DynamicKeyReason {
    match expr {
        Expr::Tpl(tpl) if !tpl.exprs.is_empty() => DynamicKeyReason::TemplateWithExpr,
        Expr::Paren(paren) => dynamic_reason(&paren.expr),
        _ => DynamicKeyReason::VariableKey,
    }
}

/// Namespace declared by a hook call's first argument.
fn hook_namespace(call: &CallExpr) -> Option<String> {
    let arg = call.args.first()?;
    match &*arg.expr {
        Expr::Array(array) => array
            .elems
            .first()?
            .as_ref()
            .and_then(|elem| static_string(&elem.expr)),
        expr => static_string(expr),
    }
}

pub struct KeyExtractor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    options: &'a ExtractOptions,
    /// Namespace from the most recent hook declaration, in source order.
    current_namespace: Option<String>,
    /// `(line, namespace)` every time the current namespace changed.
    namespace_changes: Vec<(usize, Option<String>)>,
    seen: HashSet<(String, Option<String>)>,
    pub usages: Vec<KeyUsage>,
    pub dynamic_keys: Vec<DynamicKey>,
}

impl<'a> KeyExtractor<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap, options: &'a ExtractOptions) -> Self {
        Self {
            file_path,
            source_map,
            options,
            current_namespace: None,
            namespace_changes: Vec::new(),
            seen: HashSet::new(),
            usages: Vec::new(),
            dynamic_keys: Vec::new(),
        }
    }

    /// Namespace in effect at a given line, by the last hook declared on or
    /// before it.
    pub fn namespace_at(&self, line: usize) -> Option<String> {
        self.namespace_changes
            .iter()
            .take_while(|(changed_at, _)| *changed_at <= line)
            .last()
            .and_then(|(_, namespace)| namespace.clone())
    }

    /// Record a key, splitting off an explicit `namespace:` prefix.
    /// Repeated `(key, namespace)` pairs are ignored.
    pub fn add_usage(&mut self, raw_key: &str, default_namespace: Option<String>, line: usize, col: usize) {
        let (namespace, key) = match self.options.split_namespace(raw_key) {
            Some((namespace, key)) => (Some(namespace.to_string()), key),
            None => (default_namespace, raw_key),
        };
        if key.is_empty() {
            return;
        }

        if self.seen.insert((key.to_string(), namespace.clone())) {
            self.usages.push(KeyUsage::new(key, namespace, line, col));
        }
    }

    fn add_dynamic_key(&mut self, loc: &Loc, reason: DynamicKeyReason) {
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.trim().to_string())
            .unwrap_or_default();
        self.dynamic_keys.push(DynamicKey {
            file_path: self.file_path.to_string(),
            line: loc.line,
            col: loc.col_display + 1,
            reason,
            source_line,
        });
    }

    /// Name of the called function: `t` for both `t(...)` and `i18n.t(...)`.
    fn callee_name(callee: &Callee) -> Option<(&str, bool)> {
        let Callee::Expr(expr) = callee else {
            return None;
        };
        match &**expr {
            Expr::Ident(ident) => Some((ident.sym.as_str(), false)),
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => Some((prop.sym.as_str(), true)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Visit for KeyExtractor<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some((name, is_member)) = Self::callee_name(&node.callee) {
            if !is_member && self.options.is_translation_hook(name) {
                let loc = self.source_map.lookup_char_pos(node.span.lo);
                self.current_namespace = hook_namespace(node);
                self.namespace_changes
                    .push((loc.line, self.current_namespace.clone()));
            } else if self.options.is_translation_function(name)
                && let Some(arg) = node.args.first()
            {
                let loc = self.source_map.lookup_char_pos(node.span.lo);
                match static_string(&arg.expr) {
                    Some(raw_key) => {
                        let namespace = self.current_namespace.clone();
                        self.add_usage(&raw_key, namespace, loc.line, loc.col_display + 1);
                    }
                    None => {
                        let reason = dynamic_reason(&arg.expr);
                        self.add_dynamic_key(&loc, reason);
                    }
                }
            }
        }

        node.visit_children_with(self);
    }
}
