//! Iteration cursors for in-progress fires.
//!
//! Each active fire owns one [`Cursor`] in a stack indexed by nesting level.
//! A cursor never caches the priority list: after every callback the next
//! step is re-derived from the live registry, so buckets added, removed or
//! emptied mid-fire are observed on the following step.

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;

use indexmap::IndexMap;

use super::definitions::{CallbackEntry, CallbackId};

/// Callbacks at one priority, in insertion order.
pub type PriorityBucket = IndexMap<CallbackId, CallbackEntry>;

/// Position of one active fire.
#[derive(Debug, Default)]
pub struct Cursor {
    /// Priority of the bucket being consumed, `None` before the first step.
    priority: Option<i64>,
    /// Callbacks already invoked from the current bucket.
    fired: HashSet<CallbackId>,
    /// Last callback invoked from the current bucket.
    last: Option<CallbackId>,
    /// Set when every callback was removed mid-fire.
    halted: bool,
}

impl Cursor {
    /// Returns the priority currently being processed.
    pub fn priority(&self) -> Option<i64> {
        self.priority
    }

    /// Returns whether this pass was aborted.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Stops this pass before its next callback.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Advances to the next callback to invoke.
    ///
    /// Resumes in the current bucket (if it still exists) with the first
    /// entry not yet invoked, then moves on to strictly higher priorities.
    /// Priorities below the current one are never revisited.
    ///
    /// The scan restarts right after the last invoked entry. Only when that
    /// entry was removed does it fall back to the bucket start, skipping ids
    /// in the fired set.
    pub fn advance(
        &mut self,
        callbacks: &BTreeMap<i64, PriorityBucket>,
    ) -> Option<(i64, CallbackEntry)> {
        if self.halted {
            return None;
        }

        let start = self.priority.map_or(Bound::Unbounded, Bound::Included);
        for (&priority, bucket) in callbacks.range((start, Bound::Unbounded)) {
            if self.priority != Some(priority) {
                self.priority = Some(priority);
                self.fired.clear();
                self.last = None;
            }

            // Buckets only grow at the end, so everything before the last
            // invoked entry has already run.
            let resume = self
                .last
                .as_ref()
                .and_then(|id| bucket.get_index_of(id))
                .map_or(0, |index| index + 1);

            let next = bucket
                .values()
                .skip(resume)
                .find(|entry| !self.fired.contains(entry.callback.id()));

            if let Some(entry) = next {
                let id = entry.callback.id().clone();
                self.fired.insert(id.clone());
                self.last = Some(id);
                return Some((priority, entry.clone()));
            }
        }

        None
    }
}

/// Stack of cursors, one per nested fire.
#[derive(Debug, Default)]
pub struct CursorStack {
    cursors: Vec<Cursor>,
}

impl CursorStack {
    /// Pushes a fresh cursor and returns its nesting level.
    pub fn push(&mut self) -> usize {
        self.cursors.push(Cursor::default());
        self.cursors.len() - 1
    }

    /// Pops the innermost cursor.
    pub fn pop(&mut self) -> Option<Cursor> {
        self.cursors.pop()
    }

    /// Returns the cursor at a nesting level.
    pub fn get_mut(&mut self, level: usize) -> Option<&mut Cursor> {
        self.cursors.get_mut(level)
    }

    /// Returns the innermost cursor.
    pub fn innermost(&self) -> Option<&Cursor> {
        self.cursors.last()
    }

    /// Number of active fires.
    pub fn depth(&self) -> usize {
        self.cursors.len()
    }

    /// Halts every active fire.
    pub fn halt_all(&mut self) {
        for cursor in &mut self.cursors {
            cursor.halt();
        }
    }
}
