//! Per-query dynamic context.
//!
//! Created once at the start of a top-level `select_*` call and dropped
//! when results are collected. Holds the processing options plus a
//! memoization cache from a root selector's stable id to its already
//! evaluated post-tail value, so that a query referencing `$` more than
//! once (typically inside filter subqueries) does not re-walk the whole
//! document for every reference.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::JsonPathError;
use crate::value::Value;

/// How a union of selectors executes its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// Query-wide options threaded through the three driver entry points.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub max_depth: usize,
    pub execution_mode: ExecutionMode,
    pub no_duplicates: bool,
    pub sort: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_depth: 64, execution_mode: ExecutionMode::Sequential, no_duplicates: false, sort: false }
    }
}

/// Bitfield of processing flags derived from [`Options`].
/// Setting `NoDuplicates` or `SortByPath` implies `Path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingFlags {
    pub path: bool,
    pub no_duplicates: bool,
    pub sort_by_path: bool,
}

impl From<&Options> for ProcessingFlags {
    fn from(options: &Options) -> Self {
        let no_duplicates = options.no_duplicates;
        let sort_by_path = options.sort;
        ProcessingFlags { path: no_duplicates || sort_by_path, no_duplicates, sort_by_path }
    }
}

/// Per-query mutable state: the options in force and the root-selector
/// memoization table. A `Mutex` (rather than a `RefCell`) guards the
/// memo table so `Resources` stays `Sync`, which `ExecutionMode::Parallel`
/// unions need in order to share one `&Resources` across rayon's worker
/// threads.
pub struct Resources {
    pub options: Options,
    memo: Mutex<HashMap<u64, Value>>,
}

impl Resources {
    pub fn new(options: Options) -> Self {
        Self { options, memo: Mutex::new(HashMap::new()) }
    }

    pub fn flags(&self) -> ProcessingFlags {
        ProcessingFlags::from(&self.options)
    }

    /// Fetch a memoized root evaluation, or compute and store it via
    /// `compute` on first access. The lock is released while `compute`
    /// runs (never held across it) so a root subquery whose own
    /// evaluation references a *different* memoized id does not
    /// deadlock against itself; a concurrent miss on the same id may
    /// compute twice, which is safe since `compute` is pure.
    pub fn memoized_root(&self, id: u64, compute: impl FnOnce() -> Value) -> Value {
        if let Some(hit) = self.memo.lock().unwrap().get(&id) {
            return hit.clone();
        }
        let value = compute();
        self.memo.lock().unwrap().insert(id, value.clone());
        value
    }

    pub fn check_depth(&self, depth: usize) -> Result<(), JsonPathError> {
        if depth > self.options.max_depth {
            Err(JsonPathError::MaxDepthExceeded { max_depth: self.options.max_depth })
        } else {
            Ok(())
        }
    }
}
