//! Helpers over parsed path expressions.

use crate::PathExpression;

/// Canonical string form of an expression (`.`-joined elements).
pub fn path_to_string(expression: &PathExpression) -> String {
    expression.to_string()
}

/// Property names visited at the top level, in traversal order.
pub fn accessed_properties(expression: &PathExpression) -> Vec<String> {
    expression
        .iter()
        .map(|element| element.property_name().to_string())
        .collect()
}

/// Every property name the expression reads, including those inside
/// bracket sub-expressions, depth-first.
pub fn referenced_properties(expression: &PathExpression) -> Vec<String> {
    let mut out = Vec::new();
    collect_referenced(expression, &mut out);
    out
}

fn collect_referenced(expression: &PathExpression, out: &mut Vec<String>) {
    for element in expression {
        out.push(element.property_name().to_string());
        if let Some(sub) = element.sub_expression() {
            collect_referenced(sub, out);
        }
    }
}
