//! Ancestor-prefixed renaming of sentinel ids
//!
//! Walks a JSON tree depth-first. Whenever an object's `"id"` equals one of the
//! sentinel labels, the id is rewritten to `<grandparent>_<parent>_<id>`, where
//! parent and grandparent are the ids of the two closest enclosing objects.
//! Arrays are transparent: their elements see the same ancestors as the array's
//! owner.
//!
//! Only two labels travel down the recursion, so state stays constant no
//! matter how deep the tree is.

// this_file: crates/tabid-core/src/annotate.rs

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::config::default_sentinels;

/// Key holding a node's identifier
pub const ID_KEY: &str = "id";

/// Separator between prefix segments and the original id
pub const SEPARATOR: &str = "_";

/// What a single annotation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotateStats {
    /// Objects visited
    pub visited: usize,
    /// Sentinel ids that received a prefix
    pub rewritten: usize,
    /// Sentinel ids left alone because an ancestor label was missing
    pub skipped: usize,
}

impl fmt::Display for AnnotateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} objects visited, {} ids rewritten, {} sentinels without ancestors",
            self.visited, self.rewritten, self.skipped
        )
    }
}

/// Rewrites sentinel ids in place
#[derive(Debug, Clone)]
pub struct Annotator {
    sentinels: BTreeSet<String>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(default_sentinels())
    }
}

impl Annotator {
    pub fn new(sentinels: BTreeSet<String>) -> Self {
        Self { sentinels }
    }

    pub fn sentinels(&self) -> &BTreeSet<String> {
        &self.sentinels
    }

    pub fn is_sentinel(&self, label: &str) -> bool {
        self.sentinels.contains(label)
    }

    /// Annotate a whole document starting with no known ancestors.
    ///
    /// A root that is not an object is left untouched.
    pub fn annotate(&self, root: &mut Value) -> AnnotateStats {
        let mut stats = AnnotateStats::default();
        self.annotate_with(root, None, None, &mut stats);
        stats
    }

    /// Annotate `node` as if it sat below `parent` and `grandparent`.
    ///
    /// Children receive this node's id as it was *before* any rewrite, and the
    /// incoming `parent` as their grandparent.
    pub fn annotate_with(
        &self,
        node: &mut Value,
        parent: Option<&str>,
        grandparent: Option<&str>,
        stats: &mut AnnotateStats,
    ) {
        let Value::Object(map) = node else {
            return;
        };
        stats.visited += 1;

        let current = map.get(ID_KEY).and_then(id_label);
        // Only string ids can be sentinels
        let string_id = matches!(map.get(ID_KEY), Some(Value::String(_)));

        if let Some(label) = current.as_deref() {
            if string_id && self.is_sentinel(label) {
                self.rename(map, label, parent, grandparent, stats);
            }
        }

        for value in map.values_mut() {
            if value.is_object() {
                self.annotate_with(value, current.as_deref(), parent, stats);
            } else if let Value::Array(items) = value {
                for item in items.iter_mut() {
                    self.annotate_with(item, current.as_deref(), parent, stats);
                }
            }
        }
    }

    fn rename(
        &self,
        map: &mut Map<String, Value>,
        label: &str,
        parent: Option<&str>,
        grandparent: Option<&str>,
        stats: &mut AnnotateStats,
    ) {
        match ancestor_prefix(parent, grandparent) {
            Some(prefix) => {
                let renamed = format!("{prefix}{SEPARATOR}{label}");
                log::trace!("Renaming {label:?} to {renamed:?}");
                if let Some(slot) = map.get_mut(ID_KEY) {
                    *slot = Value::String(renamed);
                }
                stats.rewritten += 1;
            },
            None => {
                log::debug!("Sentinel {label:?} has no parent/grandparent ids, left as is");
                stats.skipped += 1;
            },
        }
    }
}

/// The label an id contributes to its descendants' prefixes.
///
/// Strings are used verbatim and non-zero numbers by their JSON text. Zero,
/// booleans, null and containers yield no label.
pub fn id_label(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// `<grandparent>_<parent>`, or `None` unless both labels are non-empty
pub fn ancestor_prefix(parent: Option<&str>, grandparent: Option<&str>) -> Option<String> {
    match (grandparent, parent) {
        (Some(grandparent), Some(parent)) if !grandparent.is_empty() && !parent.is_empty() => {
            Some(format!("{grandparent}{SEPARATOR}{parent}"))
        },
        _ => None,
    }
}

/// Annotate `root` with the default upstream/downstream sentinels
pub fn annotate(root: &mut Value) -> AnnotateStats {
    Annotator::default().annotate(root)
}
