// tests/test_harness.rs
//! Test harness for the NASL parser integration tests.
//!
//! Loads `.nasl` fixtures from `test_scripts/`, parses them in either mode
//! and offers assertions and node tallies over the result.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use bumpalo::Bump;
use nasl::*;

/// A fixture script read from disk.
pub struct Fixture {
    pub name: String,
    pub source: String,
}

/// Loads fixtures from the `test_scripts` directory.
pub struct TestHarness {
    test_scripts_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let test_scripts_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_scripts");
        Self { test_scripts_dir }
    }

    pub fn load(&self, filename: &str) -> Fixture {
        let path = self.test_scripts_dir.join(filename);
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        Fixture {
            name: filename.to_string(),
            source,
        }
    }

    /// Every fixture file name, sorted.
    pub fn all(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.test_scripts_dir)
            .expect("test_scripts directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".nasl"))
            .collect();
        names.sort();
        names
    }
}

impl Fixture {
    /// Parse strictly, panicking with a rendered diagnostic on failure.
    pub fn parse_ok<'ast>(&self, arena: &'ast Bump) -> Script<'ast> {
        match parse(&self.source, arena) {
            Ok(script) => script,
            Err(err) => {
                let rendered = match &err {
                    NaslError::Syntax(e) | NaslError::Unimplemented(e) => {
                        e.display_with_source(&self.source)
                    }
                    NaslError::Lex(e) => e.to_string(),
                };
                panic!("{} failed to parse:\n{}", self.name, rendered)
            }
        }
    }

    pub fn parse_strict<'ast>(&self, arena: &'ast Bump) -> Result<Script<'ast>, NaslError> {
        parse(&self.source, arena)
    }

    pub fn parse_lenient<'ast>(
        &self,
        arena: &'ast Bump,
    ) -> Result<(Script<'ast>, ParseErrors), NaslError> {
        parse_lenient(&self.source, arena)
    }
}

/// Node tallies for one script.
pub fn count_nodes(script: &Script<'_>) -> KindCounter {
    let mut counter = KindCounter::new();
    counter.visit_script(script);
    counter
}

/// Names of every called function, in traversal order.
pub fn called_functions<'ast>(script: &Script<'ast>) -> Vec<&'ast str> {
    struct Calls<'ast>(Vec<&'ast str>);

    impl<'ast> Visitor<'ast> for Calls<'ast> {
        fn visit_func_call(&mut self, call: &'ast FuncCall<'ast>) {
            self.0.push(call.name.name);
            visitor::walk_func_call(self, call);
        }
    }

    let mut calls = Calls(Vec::new());
    calls.visit_script(script);
    calls.0
}
