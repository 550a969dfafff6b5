//! The parser generator itself (spec §4.E, component E): walks a
//! [`Grammar`] AST and renders textual source code for a target
//! combinator library.
//!
//! Grounded on `leo_compiler_passes::CodeGenerator` (`ProvableHQ-leo`,
//! `compiler/passes/src/code_generation`): a small struct threaded
//! through one `visit_*`-per-variant match, each call returning the
//! text for its own node rather than writing into a shared buffer —
//! adapted here to pure expression output, since a combinator grammar
//! has no statement/instruction split the way Leo's target ISA does.
//!
//! Every generated rule returns `Parser<Value>`, one uniform sum type
//! defined in the generated header, rather than a precisely inferred
//! per-rule Rust type. Rules may be mutually recursive, and this
//! generator never compiles its own output (nothing in this crate runs
//! the Rust toolchain against generated text), so a uniform value type
//! avoids a second, circular type-inference pass for no real payoff —
//! see DESIGN.md.

use crate::ast::{CharRange, Expr, Grammar};
use crate::error::GeneratorError;
use crate::generator::config::GeneratorConfig;
use crate::util::DepthGuard;
use std::collections::{BTreeSet, HashSet};

/// The textual artifact `generate` produces (spec §4.E: "Output. A
/// textual artifact `{imports, exports, code}`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    pub code: String,
}

struct Generator<'g> {
    config: &'g GeneratorConfig,
    rule_names: HashSet<&'g str>,
    imports: BTreeSet<&'static str>,
}

impl<'g> Generator<'g> {
    fn new(grammar: &'g Grammar, config: &'g GeneratorConfig) -> Self {
        Self {
            config,
            rule_names: grammar.rules.iter().map(|r| r.name.as_str()).collect(),
            imports: BTreeSet::new(),
        }
    }

    fn visit(&mut self, expr: &Expr, depth: DepthGuard) -> Result<String, GeneratorError> {
        let depth = depth
            .enter()
            .map_err(|limit| GeneratorError::RecursionLimit { limit })?;
        match expr {
            Expr::StringLiteral { value, .. } => {
                self.imports.insert("literal");
                self.imports.insert("map");
                Ok(format!("map(literal({:?}), Value::Str)", value))
            }
            Expr::CharacterClass { ranges, negated } => {
                self.imports.insert("character_class");
                self.imports.insert("map");
                let items = ranges
                    .iter()
                    .map(render_range)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!(
                    "map(character_class(vec![{}], {}), Value::Char)",
                    items, negated
                ))
            }
            Expr::AnyChar => {
                self.imports.insert("any");
                self.imports.insert("map");
                Ok("map(any(), Value::Char)".to_string())
            }
            Expr::Identifier { name } => {
                if !self.rule_names.contains(name.as_str()) {
                    return Err(GeneratorError::UnresolvedReference { name: name.clone() });
                }
                Ok(format!("{}{}()", self.config.name_prefix, name))
            }
            // Qualified references are resolved by the host at link time,
            // not by this generator (spec §4.E, §7): the prefix is never
            // applied across a module boundary.
            Expr::QualifiedIdentifier { module, name } => Ok(format!("{}::{}()", module, name)),
            Expr::Sequence { elements } => {
                self.imports.insert("sequence");
                self.imports.insert("map");
                let parts = elements
                    .iter()
                    .map(|e| self.visit(e, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!(
                    "map(sequence(vec![{}]), Value::List)",
                    parts.join(", ")
                ))
            }
            Expr::Choice { alternatives } => {
                self.imports.insert("choice");
                let parts = alternatives
                    .iter()
                    .map(|e| self.visit(e, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("choice(vec![{}])", parts.join(", ")))
            }
            // Parentheses exist only to override precedence in source
            // text; the AST already reflects that via nesting, so
            // `Group` translates as a pass-through (spec §4.E).
            Expr::Group { expression } => self.visit(expression, depth),
            Expr::Star { expression } => {
                self.imports.insert("star");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                Ok(format!("map(star({}), Value::List)", inner))
            }
            Expr::Plus { expression } => {
                self.imports.insert("plus");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                Ok(format!("map(plus({}), Value::List)", inner))
            }
            Expr::Optional { expression } => {
                self.imports.insert("optional");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                Ok(format!(
                    "map(optional({}), |v| Value::List(v.into_iter().collect()))",
                    inner
                ))
            }
            Expr::Quantified { expression, bound } => {
                self.imports.insert("quantified");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                let max_text = match bound.max {
                    Some(m) => format!("Some({})", m),
                    None => "None".to_string(),
                };
                Ok(format!(
                    "map(quantified({}, {}, {}), Value::List)",
                    inner, bound.min, max_text
                ))
            }
            Expr::PositiveLookahead { expression } => {
                self.imports.insert("and_");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                Ok(format!("map(and_({}), |_| Value::Unit)", inner))
            }
            Expr::NegativeLookahead { expression } => {
                self.imports.insert("not_");
                self.imports.insert("map");
                let inner = self.visit(expression, depth)?;
                Ok(format!("map(not_({}), |_| Value::Unit)", inner))
            }
            // Labels have no runtime semantics in the combinator layer
            // (spec §9 open question, resolved in SPEC_FULL §12): kept
            // only as a comment when `includeTypes` asks for
            // annotations, dropped silently otherwise.
            Expr::LabeledExpression { label, expression } => {
                let inner = self.visit(expression, depth)?;
                if self.config.include_types {
                    Ok(format!("/* label: {} */ {}", label, inner))
                } else {
                    Ok(inner)
                }
            }
        }
    }
}

fn render_range(range: &CharRange) -> String {
    match range.end {
        Some(end) => format!(
            "CharRange::range({:?}, {:?}).expect(\"validated by the meta-grammar parser\")",
            range.start, end
        ),
        None => format!("CharRange::single({:?})", range.start),
    }
}

/// Translates `grammar` into source text for `config.combinator_module`
/// (spec §4.E, §6). Rule-to-rule references are late-bound simply by
/// being ordinary function calls: Rust resolves item names against the
/// whole enclosing scope regardless of textual order, so mutually
/// recursive rules need no forward-declaration machinery in the
/// *generated* output — unlike this crate's own hand-written
/// [`crate::combinator::Forward`], which exists only because `Parser<T>`
/// values are built bottom-up at runtime rather than declared as items.
pub fn generate(grammar: &Grammar, config: &GeneratorConfig) -> Result<GeneratedCode, GeneratorError> {
    let mut generator = Generator::new(grammar, config);
    let mut bindings = Vec::with_capacity(grammar.rules.len());
    let mut exports = Vec::with_capacity(grammar.rules.len());

    for rule in &grammar.rules {
        exports.push(rule.name.clone());
        let body = generator.visit(&rule.pattern, DepthGuard::default())?;
        let fn_name = format!("{}{}", config.name_prefix, rule.name);
        let doc = rule
            .doc
            .as_ref()
            .map(|d| format!("/// {}\n", d))
            .unwrap_or_default();
        bindings.push(format!(
            "{doc}pub fn {fn_name}() -> Parser<Value> {{\n    {body}\n}}\n",
            doc = doc,
            fn_name = fn_name,
            body = body
        ));
    }

    let mut code = String::new();
    code.push_str("// Generated by tpeg. Do not edit by hand.\n");
    code.push_str(
        "// Rule functions reference each other directly; Rust resolves mutual\n\
         // recursion among top-level items without an explicit forward\n\
         // declaration step.\n",
    );
    if config.include_imports {
        code.push_str(&format!(
            "use {}::{{{}}};\n",
            config.combinator_module,
            generator
                .imports
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));
        code.push_str("use tpeg::ast::CharRange;\n");
    }
    code.push_str(
        "\n#[derive(Debug, Clone, PartialEq)]\npub enum Value {\n    Str(String),\n    Char(char),\n    List(Vec<Value>),\n    Unit,\n}\n\n",
    );
    for binding in &bindings {
        code.push_str(binding);
        code.push('\n');
    }

    Ok(GeneratedCode {
        imports: generator.imports.iter().map(|s| s.to_string()).collect(),
        exports,
        code,
    })
}
