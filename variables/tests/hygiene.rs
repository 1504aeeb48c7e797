//! Hygiene: source scan for panicking or error-swallowing patterns.
//!
//! Tree edits run inside the editor process and must never take it down, so
//! every budget below is zero. Test files (`*_test.rs`) are exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// (pattern, budget, what it costs us)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on None/Err"),
    (".expect(", 0, "panics on None/Err"),
    ("panic!(", 0, "aborts the editor"),
    ("unreachable!(", 0, "aborts the editor"),
    ("todo!(", 0, "unfinished code path"),
    ("unimplemented!(", 0, "unfinished code path"),
    ("let _ =", 0, "discards a result unread"),
    (".ok()", 0, "drops the error half of a Result"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

fn production_sources(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let is_rust = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rust && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

#[test]
fn sources_are_found() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|(path, _)| path.ends_with("lib.rs")), "scan did not reach src/lib.rs");
}

#[test]
fn pattern_budgets_hold() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);

    let mut report = Vec::new();
    for (pattern, budget, cost) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .flat_map(|(path, content)| {
                content
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| line.contains(pattern))
                    .map(move |(number, _)| format!("  {}:{}", path.display(), number + 1))
            })
            .collect();
        if hits.len() > *budget {
            report.push(format!(
                "`{pattern}` ({cost}): found {}, budget {budget}\n{}",
                hits.len(),
                hits.join("\n")
            ));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
