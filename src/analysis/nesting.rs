//! Maximum lexical nesting depth.

use tree_sitter::Node;

/// Constructs that open a new lexical block level.
const BLOCK_KINDS: [&str; 7] = [
    "if_statement",
    "for_statement",
    "while_statement",
    "with_statement",
    "try_statement",
    "function_definition",
    "class_definition",
];

/// Maximum nesting depth of block-introducing constructs under `root`.
///
/// Depth increments by exactly one on entering any block kind; all other
/// nodes pass depth through unchanged. A tree with no block constructs
/// has depth 0.
pub fn max_nesting_depth(root: Node) -> usize {
    let own = usize::from(BLOCK_KINDS.contains(&root.kind()));

    let mut cursor = root.walk();
    let deepest_child = root
        .named_children(&mut cursor)
        .map(max_nesting_depth)
        .max()
        .unwrap_or(0);

    own + deepest_child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn depth(source: &str) -> usize {
        let parsed = parser::parse(source).unwrap();
        max_nesting_depth(parsed.root())
    }

    #[test]
    fn test_flat_module_is_zero() {
        assert_eq!(depth("x = 1\ny = x + 2\n"), 0);
        assert_eq!(depth(""), 0);
    }

    #[test]
    fn test_single_block_is_one() {
        assert_eq!(depth("if x:\n    pass\n"), 1);
        assert_eq!(depth("while True:\n    pass\n"), 1);
        assert_eq!(depth("with open('f') as f:\n    pass\n"), 1);
    }

    #[test]
    fn test_function_in_class_is_two() {
        let source = r#"
class C:
    def method(self):
        pass
"#;
        assert_eq!(depth(source), 2);
    }

    #[test]
    fn test_deep_nesting() {
        let source = r#"
def f():
    for i in range(3):
        if i:
            try:
                g()
            except ValueError:
                pass
"#;
        // def > for > if > try
        assert_eq!(depth(source), 4);
    }

    #[test]
    fn test_siblings_do_not_stack() {
        let source = r#"
if a:
    pass
if b:
    pass
for x in y:
    pass
"#;
        assert_eq!(depth(source), 1);
    }

    #[test]
    fn test_async_function_counts_as_block() {
        assert_eq!(depth("async def f():\n    if x:\n        pass\n"), 2);
    }
}
