//! Per-function and per-class structural records.
//!
//! Re-walks the tree independently of the structural visitor, then sorts
//! each record list by starting line so output never depends on traversal
//! order.

use tree_sitter::Node;

use super::facts::{ClassInfo, FunctionInfo};
use crate::metrics::ComplexityIndex;
use crate::parser::ParsedSource;

/// Build sorted function and class records, joining complexity scores by
/// exact (name, starting line) match. Symbols the evaluator scored under
/// a different line or name (decorated or redefined ones) simply get no
/// complexity.
pub fn build(parsed: &ParsedSource, index: &ComplexityIndex) -> (Vec<FunctionInfo>, Vec<ClassInfo>) {
    let mut functions = Vec::new();
    let mut classes = Vec::new();
    collect(parsed.root(), parsed, index, &mut functions, &mut classes);

    functions.sort_by_key(|f| f.line);
    classes.sort_by_key(|c| c.line);
    (functions, classes)
}

fn collect(
    node: Node,
    parsed: &ParsedSource,
    index: &ComplexityIndex,
    functions: &mut Vec<FunctionInfo>,
    classes: &mut Vec<ClassInfo>,
) {
    match node.kind() {
        "function_definition" => {
            if let Some(info) = function_info(node, parsed, index) {
                functions.push(info);
            }
        }
        "class_definition" => {
            if let Some(info) = class_info(node, parsed) {
                classes.push(info);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(child, parsed, index, functions, classes);
    }
}

fn function_info(node: Node, parsed: &ParsedSource, index: &ComplexityIndex) -> Option<FunctionInfo> {
    let name = parsed.node_text(node.child_by_field_name("name")?).to_string();
    let line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;

    let args = node
        .child_by_field_name("parameters")
        .map(|params| parameter_names(params, parsed))
        .unwrap_or_default();

    Some(FunctionInfo {
        complexity: index.lookup(&name, line),
        name,
        line,
        end_line,
        loc: end_line - line + 1,
        args,
    })
}

/// Ordinary positional parameter names in declaration order.
///
/// Stops at `*args` / `**kwargs` / the bare `*` separator; everything
/// after those is not an ordinary positional parameter.
fn parameter_names(params: Node, parsed: &ParsedSource) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = params.walk();

    for child in params.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(parsed.node_text(child).to_string()),
            "typed_parameter" => {
                if let Some(id) = child.named_child(0) {
                    if id.kind() == "identifier" {
                        names.push(parsed.node_text(id).to_string());
                    }
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(id) = child.child_by_field_name("name") {
                    names.push(parsed.node_text(id).to_string());
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
            _ => {}
        }
    }

    names
}

fn class_info(node: Node, parsed: &ParsedSource) -> Option<ClassInfo> {
    let name = parsed.node_text(node.child_by_field_name("name")?).to_string();
    let line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;

    Some(ClassInfo {
        name,
        line,
        end_line,
        loc: end_line - line + 1,
        method_count: method_count(node),
    })
}

/// Direct-child function definitions only; methods of nested classes do
/// not count toward the outer class.
fn method_count(class_node: Node) -> usize {
    let body = match class_node.child_by_field_name("body") {
        Some(b) => b,
        None => return 0,
    };

    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|child| match child.kind() {
            "function_definition" => true,
            "decorated_definition" => child
                .child_by_field_name("definition")
                .is_some_and(|d| d.kind() == "function_definition"),
            _ => false,
        })
        .count()
}
