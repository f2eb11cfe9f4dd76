//! Named shader chunks and `#include <name>` resolution
//!
//! Shader templates reference reusable chunks through include directives:
//!
//! ```glsl
//! #include <fog_pars_vertex>
//! ```
//!
//! The registry stores chunk sources by name and expands those directives
//! recursively when a program is assembled. Every mutation bumps a revision
//! counter so callers can observe whether the registry has been patched.

use crate::{HelioError, Result};
use std::collections::HashMap;

/// Maximum include nesting before resolution gives up
pub const MAX_INCLUDE_DEPTH: usize = 16;

#[derive(Debug, Default, Clone)]
pub struct ShaderChunkRegistry {
    chunks: HashMap<String, String>,
    revision: u64,
}

impl ShaderChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry pre-populated with `(name, source)` pairs.
    pub fn with_chunks<'a>(chunks: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut registry = Self::new();
        for (name, source) in chunks {
            registry.insert(name, source);
        }
        registry
    }

    /// Insert or replace a chunk, returning the previous source if any.
    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) -> Option<String> {
        let name = name.into();
        log::trace!("Registering shader chunk '{}'", name);
        self.revision += 1;
        self.chunks.insert(name, source.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.chunks.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chunks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of mutations applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Expand every include directive in `source`.
    pub fn resolve(&self, source: &str) -> Result<String> {
        let mut stack = Vec::new();
        self.resolve_into(source, &mut stack)
    }

    fn resolve_into(&self, source: &str, stack: &mut Vec<String>) -> Result<String> {
        if stack.len() > MAX_INCLUDE_DEPTH {
            return Err(HelioError::IncludeDepthExceeded(MAX_INCLUDE_DEPTH));
        }

        let mut lines = Vec::new();
        for line in source.lines() {
            let Some(name) = parse_include(line) else {
                lines.push(line.to_string());
                continue;
            };

            if stack.iter().any(|open| open == name) {
                return Err(HelioError::IncludeCycle(name.to_string()));
            }

            let chunk = self
                .get(name)
                .ok_or_else(|| HelioError::ShaderChunkNotFound(name.to_string()))?;

            stack.push(name.to_string());
            let expanded = self.resolve_into(chunk, stack)?;
            stack.pop();

            lines.push(expanded);
        }

        Ok(lines.join("\n"))
    }
}

/// Extract the chunk name from an `#include <name>` line.
pub fn parse_include(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("#include")?.trim();
    let name = rest.strip_prefix('<')?.strip_suffix('>')?.trim();
    (!name.is_empty()).then_some(name)
}

/// Render the include directive for `name`.
pub fn include_directive(name: &str) -> String {
    format!("#include <{}>", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_include_lines() {
        assert_eq!(parse_include("#include <fog_vertex>"), Some("fog_vertex"));
        assert_eq!(parse_include("\t#include < common >"), Some("common"));
        assert_eq!(parse_include("// #include <fog_vertex>"), None);
        assert_eq!(parse_include("#include \"fog\""), None);
        assert_eq!(parse_include("#include <>"), None);
    }

    #[test]
    fn resolves_nested_includes() {
        let registry = ShaderChunkRegistry::with_chunks([
            ("outer", "float a;\n#include <inner>"),
            ("inner", "float b;"),
        ]);
        let resolved = registry.resolve("void f();\n#include <outer>\nvoid g();").unwrap();
        assert_eq!(resolved, "void f();\nfloat a;\nfloat b;\nvoid g();");
    }

    #[test]
    fn missing_chunk_is_an_error() {
        let registry = ShaderChunkRegistry::new();
        assert_eq!(
            registry.resolve("#include <nope>"),
            Err(HelioError::ShaderChunkNotFound("nope".into()))
        );
    }

    #[test]
    fn include_cycles_are_detected() {
        let registry = ShaderChunkRegistry::with_chunks([
            ("a", "#include <b>"),
            ("b", "#include <a>"),
        ]);
        assert_eq!(
            registry.resolve("#include <a>"),
            Err(HelioError::IncludeCycle("a".into()))
        );
    }

    #[test]
    fn revision_counts_every_insert() {
        let mut registry = ShaderChunkRegistry::new();
        assert_eq!(registry.revision(), 0);
        registry.insert("x", "1");
        assert!(registry.insert("x", "2").is_some());
        assert_eq!(registry.revision(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("x"), Some("2"));
    }
}
