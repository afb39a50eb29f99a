//! Integration tests for the syntax tree loader.

use pygauge::parser;

#[test]
fn test_parses_realistic_module() {
    let source = r#"
import json
from typing import Optional


class Store:
    """Key-value store."""

    def __init__(self):
        self.data = {}

    def get(self, key: str) -> Optional[str]:
        return self.data.get(key)


def dump(store: Store) -> str:
    return json.dumps(store.data)
"#;
    let parsed = parser::parse(source).unwrap();
    assert_eq!(parsed.root().kind(), "module");
    assert!(!parsed.root().has_error());
}

#[test]
fn test_modern_syntax_accepted() {
    // Walrus, f-strings, match statements, starred calls.
    let source = r#"
def handle(command, *args):
    if (n := len(args)) > 2:
        print(f"too many: {n}")
    match command:
        case "start":
            return True
        case _:
            return False
"#;
    assert!(parser::parse(source).is_ok());
}

#[test]
fn test_error_record_fields() {
    let err = parser::parse("x = 1\ny = ((2\nz = 3\n").unwrap_err();
    assert!(err.line >= 2, "line was {}", err.line);
    assert!(!err.message.is_empty());
}

#[test]
fn test_indentation_error_detected() {
    let err = parser::parse("def f():\nreturn 1\n");
    // Missing indented block: either an error record or a tree with a
    // missing node; the loader must not panic and must report a failure.
    assert!(err.is_err());
}

#[test]
fn test_binary_garbage_does_not_panic() {
    let garbage = "\u{0}\u{1}\u{2} ??? ]]]] def ((((";
    let result = parser::parse(garbage);
    assert!(result.is_err());
}

#[test]
fn test_loader_never_yields_tree_and_error() {
    for source in ["x = 1\n", "def broken(:\n", ""] {
        match parser::parse(source) {
            Ok(parsed) => assert!(!parsed.root().has_error()),
            Err(err) => assert!(err.line >= 1),
        }
    }
}
