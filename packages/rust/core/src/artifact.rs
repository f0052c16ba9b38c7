//! Structured index artifact codec.
//!
//! The artifact is a YAML mapping from path segment to node, each node being
//! either `{type: directory, children: {...}}` or `{type: file, title, path}`.
//! Key order in the artifact is the concatenation order, so parsing keeps it.
//!
//! Artifacts may be hand-edited. Parsing normalizes them into the typed tree:
//! nodes without a known `type` are read as directories of their own entries,
//! and anything that cannot be interpreted is rejected as malformed.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

use mdindex_shared::{DirEntries, IndexNode, IndexTree, MdIndexError, Result};

/// Maximum nesting of an artifact, as measured by [`IndexTree::depth`].
///
/// Every directory adds two YAML levels (its node and its `children`), so a
/// tree at this depth stays well inside serde_yaml's recursion limit of 128.
pub const MAX_ARTIFACT_DEPTH: usize = 32;

/// Serialize `tree` as YAML.
pub fn serialize(tree: &IndexTree) -> Result<String> {
    check_depth(tree)?;
    Ok(serde_yaml::to_string(tree)?)
}

/// Serialize `tree` as pretty-printed JSON (same shape as the YAML form).
pub fn serialize_json(tree: &IndexTree) -> Result<String> {
    check_depth(tree)?;
    let mut json = serde_json::to_string_pretty(tree)?;
    json.push('\n');
    Ok(json)
}

/// Parse an artifact produced by [`serialize`] or [`serialize_json`].
#[instrument(skip_all, fields(len = text.len()))]
pub fn deserialize(text: &str) -> Result<IndexTree> {
    let value: Value = serde_yaml::from_str(text)
        .map_err(|e| MdIndexError::malformed(format!("not a YAML document: {e}")))?;

    match value {
        Value::Mapping(map) => {
            let root = convert_entries(&map, 1, Strictness::Lenient)?;
            debug!(entries = root.len(), "artifact parsed");
            Ok(IndexTree::new(root))
        }
        other => Err(MdIndexError::malformed(format!(
            "root must be a mapping, found {}",
            kind(&other)
        ))),
    }
}

/// Refuse to write a tree that [`deserialize`] would reject.
fn check_depth(tree: &IndexTree) -> Result<()> {
    let depth = tree.depth();
    if depth > MAX_ARTIFACT_DEPTH {
        return Err(MdIndexError::Serialization(format!(
            "index tree nests {depth} levels deep; structured indexes allow at most {MAX_ARTIFACT_DEPTH}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// How non-mapping values among a mapping's entries are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strictness {
    /// `children` of a typed directory: every entry must be a node.
    Strict,
    /// Untyped mappings: scalar entries are metadata and ignored.
    Lenient,
}

fn convert_entries(map: &Mapping, depth: usize, strictness: Strictness) -> Result<DirEntries> {
    if depth > MAX_ARTIFACT_DEPTH {
        return Err(MdIndexError::malformed(format!(
            "nesting exceeds {MAX_ARTIFACT_DEPTH} levels"
        )));
    }

    let mut entries = DirEntries::new();
    for (key, value) in map {
        let name = scalar_string(key).ok_or_else(|| {
            MdIndexError::malformed(format!("entry key must be a scalar, found {}", kind(key)))
        })?;

        match value {
            Value::Mapping(node) => {
                let node = convert_node(&name, node, depth + 1)?;
                entries.insert(name, node);
            }
            other if strictness == Strictness::Strict => {
                return Err(MdIndexError::malformed(format!(
                    "entry `{name}` must be a mapping, found {}",
                    kind(other)
                )));
            }
            _ => debug!(key = %name, "ignoring non-node entry"),
        }
    }
    Ok(entries)
}

fn convert_node(name: &str, map: &Mapping, depth: usize) -> Result<IndexNode> {
    match map.get("type").and_then(Value::as_str) {
        Some("file") => {
            let path = optional_string(map, "path", name)?.unwrap_or_else(|| name.to_string());
            let title = optional_string(map, "title", name)?.unwrap_or_else(|| stem(&path));
            Ok(IndexNode::File { title, path })
        }
        Some("directory") => {
            let children = match map.get("children") {
                None | Some(Value::Null) => DirEntries::new(),
                Some(Value::Mapping(children)) => {
                    convert_entries(children, depth, Strictness::Strict)?
                }
                Some(other) => {
                    return Err(MdIndexError::malformed(format!(
                        "`children` of `{name}` must be a mapping, found {}",
                        kind(other)
                    )));
                }
            };
            Ok(IndexNode::Directory { children })
        }
        // Missing or unknown type: read the mapping itself as a directory.
        _ => Ok(IndexNode::Directory {
            children: convert_entries(map, depth, Strictness::Lenient)?,
        }),
    }
}

/// A scalar field of a file node; `None` when absent or null.
fn optional_string(map: &Mapping, field: &str, name: &str) -> Result<Option<String>> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_string(value).map(Some).ok_or_else(|| {
            MdIndexError::malformed(format!(
                "`{field}` of `{name}` must be a scalar, found {}",
                kind(value)
            ))
        }),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
