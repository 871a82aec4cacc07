// Round-trip tests: printing a tree and parsing it back yields the same tree

use chourse::parser::ast::Program;
use chourse::parser::parse::parse_source;
use chourse::transpiler::{render_c, render_source, render_tree};
use std::fs;
use std::path::PathBuf;

fn demo_sources() -> Vec<(PathBuf, String)> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut demos: Vec<(PathBuf, String)> = fs::read_dir(&dir)
        .expect("demos directory is readable")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "chourse"))
        .map(|path| {
            let source = fs::read_to_string(&path).expect("demo is readable");
            (path, source)
        })
        .collect();
    demos.sort();
    assert!(!demos.is_empty(), "no demos found in {}", dir.display());
    demos
}

fn parse(path: &PathBuf, source: &str) -> Program {
    parse_source(source).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn test_demos_round_trip() {
    for (path, source) in demo_sources() {
        let first = parse(&path, &source);
        let printed = render_source(&first);
        let second = parse_source(&printed).unwrap_or_else(|e| {
            panic!("{}: reprinted source failed: {}\n{}", path.display(), e, printed)
        });
        assert_eq!(first, second, "{}", path.display());

        // Printing is a fixed point after one pass
        assert_eq!(render_source(&second), printed, "{}", path.display());
    }
}

#[test]
fn test_parsing_is_deterministic() {
    for (path, source) in demo_sources() {
        assert_eq!(parse(&path, &source), parse(&path, &source));
    }
}

#[test]
fn test_back_ends_cover_demos() {
    for (path, source) in demo_sources() {
        let program = parse(&path, &source);

        let outline = render_tree(&program);
        assert!(outline.starts_with("Program\n"), "{}", path.display());
        assert!(outline.lines().count() > program.statements.len());

        let c = render_c(&program);
        assert!(c.starts_with("#include <stddef.h>"), "{}", path.display());
    }
}

#[test]
fn test_printed_source_is_normalized() {
    let messy = "fun  f( a:Int ){\n\n\n   return a*(2+3)\n}\n\n\nf(1)";
    let program = parse_source(messy).expect("Parsing failed");
    assert_eq!(
        render_source(&program),
        "fun f(a: Int) {\n  return a * (2 + 3)\n}\nf(1)\n"
    );
}
