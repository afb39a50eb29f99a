//! Structural visitor: one pre-order walk over the whole tree.

use tree_sitter::Node;

use super::facts::NodeFrequencyTable;

/// Block-level counts plus the node-kind frequency table, accumulated in
/// a single traversal.
#[derive(Debug, Default)]
pub struct StructuralVisitor {
    pub function_count: usize,
    pub class_count: usize,
    pub import_count: usize,
    pub frequency: NodeFrequencyTable,
}

impl StructuralVisitor {
    /// Walk every node reachable from `root` exactly once, depth-first
    /// pre-order, and tally it.
    pub fn walk(root: Node) -> Self {
        let mut visitor = Self::default();
        let mut cursor = root.walk();

        'tree: loop {
            visitor.visit(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'tree;
                }
                if !cursor.goto_parent() {
                    break 'tree;
                }
            }
        }

        visitor
    }

    fn visit(&mut self, node: Node) {
        // Anonymous nodes are grammar tokens (keywords, punctuation), not
        // node types.
        if !node.is_named() {
            return;
        }

        let kind = node.kind();
        *self.frequency.entry(kind.to_string()).or_insert(0) += 1;

        match kind {
            // tree-sitter-python uses one kind for `def` and `async def`,
            // so both count as functions.
            "function_definition" => self.function_count += 1,
            "class_definition" => self.class_count += 1,
            // One per statement, regardless of how many names it binds.
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                self.import_count += 1
            }
            _ => {}
        }
    }
}
