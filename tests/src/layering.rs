#![cfg(test)]
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use proc_macro2::LineColumn;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Attribute, Expr, ItemFn, ItemMod, ItemUse, Macro, Token, UseTree};
use walkdir::WalkDir;

/// A layer's source directory and the paths it must never reach.
struct Rule {
    dir: &'static str,
    layer: &'static str,
    forbidden: &'static [&'static str],
}

const OUTSIDE_WORLD: &[&str] = &[
    "std::fs",
    "tokio::fs",
    "std::net",
    "tokio::net",
    "std::time::SystemTime",
    "std::time::Instant",
    "chrono::Utc::now",
    "chrono::Local::now",
];

const RULES: &[Rule] = &[
    Rule {
        dir: "common/src",
        layer: "common",
        forbidden: &["pricecut_core", "pricecut_adapters"],
    },
    Rule {
        dir: "common/src",
        layer: "common",
        forbidden: OUTSIDE_WORLD,
    },
    Rule {
        dir: "core/src",
        layer: "core",
        forbidden: &["pricecut_adapters"],
    },
    Rule {
        dir: "core/src",
        layer: "core",
        forbidden: OUTSIDE_WORLD,
    },
    // the engine is pure: no ports, no services
    Rule {
        dir: "core/src/pricing",
        layer: "core::pricing",
        forbidden: &["crate::ports", "crate::application", "async_trait"],
    },
];

#[derive(Debug)]
struct Violation {
    file: PathBuf,
    at: LineColumn,
    layer: &'static str,
    target: String,
    path: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} [{} -> {}] {}",
            self.file.display(),
            self.at.line,
            self.at.column + 1,
            self.layer,
            self.target,
            self.path
        )
    }
}

struct Reference {
    path: Vec<String>,
    at: LineColumn,
}

/// Every path a file imports or names, outside of test-only items.
#[derive(Default)]
struct References {
    aliases: HashMap<String, Vec<String>>,
    imports: Vec<Reference>,
    paths: Vec<Reference>,
}

impl References {
    fn add_use_tree(&mut self, prefix: &[String], tree: &UseTree) {
        match tree {
            UseTree::Path(node) => {
                let mut next = prefix.to_vec();
                next.push(node.ident.to_string());
                self.add_use_tree(&next, &node.tree);
            }
            UseTree::Name(node) => {
                let (local, full) = imported(prefix, &node.ident);
                self.aliases.insert(local, full.clone());
                self.imports.push(Reference {
                    path: full,
                    at: node.ident.span().start(),
                });
            }
            UseTree::Rename(node) => {
                let (_, full) = imported(prefix, &node.ident);
                self.aliases.insert(node.rename.to_string(), full.clone());
                self.imports.push(Reference {
                    path: full,
                    at: node.ident.span().start(),
                });
            }
            UseTree::Glob(node) => self.imports.push(Reference {
                path: prefix.to_vec(),
                at: node.star_token.span().start(),
            }),
            UseTree::Group(node) => {
                for item in &node.items {
                    self.add_use_tree(prefix, item);
                }
            }
        }
    }

    /// Expands a leading imported name (`Utc::now` -> `chrono::Utc::now`).
    fn resolve(&self, path: &[String]) -> Vec<String> {
        match path.split_first() {
            Some((head, rest)) => match self.aliases.get(head) {
                Some(full) => full.iter().chain(rest).cloned().collect(),
                None => path.to_vec(),
            },
            None => Vec::new(),
        }
    }
}

/// `(local name, full path)` of a `use` leaf. `self` names its parent module.
fn imported(prefix: &[String], ident: &syn::Ident) -> (String, Vec<String>) {
    if ident == "self" {
        let local = prefix.last().cloned().unwrap_or_default();
        (local, prefix.to_vec())
    } else {
        let mut full = prefix.to_vec();
        full.push(ident.to_string());
        (ident.to_string(), full)
    }
}

fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("test")
            || (attr.path().is_ident("cfg")
                && attr.parse_args::<syn::Ident>().is_ok_and(|arg| arg == "test"))
    })
}

impl<'ast> Visit<'ast> for References {
    fn visit_item_use(&mut self, node: &'ast ItemUse) {
        if !is_test_only(&node.attrs) {
            self.add_use_tree(&[], &node.tree);
        }
    }

    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        if !is_test_only(&node.attrs) {
            visit::visit_item_mod(self, node);
        }
    }

    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        if !is_test_only(&node.attrs) {
            visit::visit_item_fn(self, node);
        }
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        self.paths.push(Reference {
            path: node.segments.iter().map(|s| s.ident.to_string()).collect(),
            at: node.span().start(),
        });
        visit::visit_path(self, node);
    }

    // format-like macros: arguments that parse as expressions are checked too
    fn visit_macro(&mut self, node: &'ast Macro) {
        visit::visit_macro(self, node);
        if let Ok(args) = node.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
            for arg in &args {
                self.visit_expr(arg);
            }
        }
    }
}

fn starts_with(path: &[String], target: &str) -> bool {
    let target: Vec<&str> = target.split("::").collect();
    path.len() >= target.len() && path.iter().zip(&target).all(|(a, b)| a == b)
}

fn check_source(file: &Path, source: &str, rule: &Rule) -> Vec<Violation> {
    let syntax = match syn::parse_file(source) {
        Ok(syntax) => syntax,
        Err(e) => {
            return vec![Violation {
                file: file.to_path_buf(),
                at: e.span().start(),
                layer: rule.layer,
                target: "(parse error)".to_string(),
                path: e.to_string(),
            }];
        }
    };

    let mut references = References::default();
    references.visit_file(&syntax);

    let resolved = references
        .paths
        .iter()
        .map(|reference| (references.resolve(&reference.path), reference.at));
    let imported = references
        .imports
        .iter()
        .map(|reference| (reference.path.clone(), reference.at));

    let mut violations: Vec<Violation> = Vec::new();
    for (path, at) in imported.chain(resolved) {
        for target in rule.forbidden {
            if starts_with(&path, target) {
                violations.push(Violation {
                    file: file.to_path_buf(),
                    at,
                    layer: rule.layer,
                    target: target.to_string(),
                    path: path.join("::"),
                });
            }
        }
    }
    violations.sort_by_key(|v| (v.at.line, v.at.column));
    violations
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..")
}

fn rust_sources(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
}

fn check(rule: &Rule) -> Vec<Violation> {
    let root = workspace_root().join(rule.dir);
    assert!(root.is_dir(), "missing source directory {}", root.display());

    rust_sources(&root)
        .flat_map(|file| {
            let source = std::fs::read_to_string(&file).unwrap();
            check_source(&file, &source, rule)
        })
        .collect()
}

const PLANTED: Rule = Rule {
    dir: "",
    layer: "core",
    forbidden: OUTSIDE_WORLD,
};

#[test]
fn inner_layers_never_reach_outwards() {
    let violations: Vec<Violation> = RULES.iter().flat_map(check).collect();

    assert!(
        violations.is_empty(),
        "layering violations:\n{}",
        violations
            .iter()
            .map(|v| format!("- {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[test]
fn rules_point_at_real_sources() {
    for rule in RULES {
        let count = rust_sources(&workspace_root().join(rule.dir)).count();
        assert!(count > 0, "{} holds no Rust sources", rule.dir);
    }
}

#[test]
fn grouped_and_aliased_imports_are_caught() {
    let source = "use std::{io, fs::File};\n\
                  use std::{fs, net};\n\
                  use chrono::Utc as Wall;\n\
                  fn stamp() -> i64 { Wall::now().timestamp() }\n";

    let violations = check_source(Path::new("planted.rs"), source, &PLANTED);
    let found: Vec<(usize, &str)> = violations
        .iter()
        .map(|v| (v.at.line, v.path.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![
            (1, "std::fs::File"),
            (2, "std::fs"),
            (2, "std::net"),
            (4, "chrono::Utc::now"),
        ]
    );
    assert_eq!(
        violations[0].to_string(),
        "planted.rs:1:19 [core -> std::fs] std::fs::File"
    );
}

#[test]
fn self_imports_and_macro_arguments_are_caught() {
    let source = "use std::fs::{self as disk};\n\
                  use chrono::Utc;\n\
                  fn stamp() -> String { format!(\"{}\", Utc::now()) }\n\
                  fn load() { disk::read(\"x\"); }\n";

    let violations = check_source(Path::new("planted.rs"), source, &PLANTED);
    let found: Vec<(usize, &str)> = violations
        .iter()
        .map(|v| (v.at.line, v.path.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![(1, "std::fs"), (3, "chrono::Utc::now"), (4, "std::fs::read")]
    );
}

#[test]
fn comments_and_test_modules_are_ignored() {
    let source = "// Utc::now in a comment is fine\n\
                  use chrono::{DateTime, Utc};\n\
                  fn at(now: DateTime<Utc>) -> DateTime<Utc> { now }\n\
                  #[cfg(test)]\n\
                  mod tests { fn t() { std::fs::read(\"x\").unwrap(); } }\n";

    assert!(check_source(Path::new("planted.rs"), source, &PLANTED).is_empty());
}

#[test]
fn unparsable_source_is_a_violation() {
    let violations = check_source(Path::new("planted.rs"), "fn broken( {", &PLANTED);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].target, "(parse error)");
}
