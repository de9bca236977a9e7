//! Match records: the result tree produced by every match attempt.
//!
//! Each record carries three cursors:
//!
//! - `begin`: where the attempt started.
//! - `direct_end`: committed progress. The end of the consumed span on
//!   success; where a sequence gave up on failure.
//! - `greedy_end`: the farthest position any sub-attempt reached, win or
//!   lose. Diagnostic only.
//!
//! `begin <= direct_end <= greedy_end` holds for every record the built-in
//! patterns produce.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::input::{self, Input};

/// Name attached to an item of a keyed combinator.
pub type Key = Arc<str>;

/// The result of one match attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub begin: usize,
    pub direct_end: usize,
    pub greedy_end: usize,
    pub kind: RecordKind,
}

/// Shape-specific content of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    /// A plain span with no children.
    Span,
    /// Both halves of a conditional pair.
    Binary(Box<[Record; 2]>),
    /// The winning (or last attempted) alternative of an ordered choice.
    Choice(ChoiceRecord),
    /// Every item attempted by a concatenation, intersection or difference.
    All(AllRecord),
    /// One record per accepted repetition.
    Repeat(Vec<Record>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRecord {
    /// Index of the winning alternative, unset on failure.
    pub index: Option<usize>,
    /// Key of the winning alternative, unset on failure or when unkeyed.
    pub key: Option<Key>,
    /// The winner's record, or the last alternative tried's on failure.
    pub child: Option<Box<Record>>,
}

/// Ordered children plus a key lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllRecord {
    children: Vec<Record>,
    keys: Vec<Option<Key>>,
    by_key: HashMap<Key, usize>,
}

impl AllRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child. A repeated key shadows the earlier child in lookups.
    pub fn push(&mut self, key: Option<Key>, record: Record) {
        if let Some(k) = &key {
            self.by_key.insert(k.clone(), self.children.len());
        }
        self.keys.push(key);
        self.children.push(record);
    }

    /// Look up a child by key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.by_key.get(key).map(|&i| &self.children[i])
    }

    pub fn children(&self) -> &[Record] {
        &self.children
    }

    /// Children in order, paired with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&Key>, &Record)> {
        self.keys.iter().map(Option::as_ref).zip(self.children.iter())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Record {
    /// A childless record.
    pub fn span(begin: usize, direct_end: usize, greedy_end: usize) -> Self {
        Self {
            begin,
            direct_end,
            greedy_end,
            kind: RecordKind::Span,
        }
    }

    /// A record for a composite node whose children reached as far as `reach`.
    pub fn composite(begin: usize, direct_end: usize, reach: Reach, kind: RecordKind) -> Self {
        Self {
            begin,
            direct_end,
            greedy_end: reach.get().max(direct_end),
            kind,
        }
    }

    /// A zero-width childless record at `at`.
    pub fn empty(at: usize) -> Self {
        Self::span(at, at, at)
    }

    /// The committed span `begin..direct_end`.
    pub fn span_range(&self) -> std::ops::Range<usize> {
        self.begin..self.direct_end
    }

    /// Number of characters committed.
    pub fn len(&self) -> usize {
        self.direct_end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.direct_end <= self.begin
    }

    pub fn as_choice(&self) -> Option<&ChoiceRecord> {
        match &self.kind {
            RecordKind::Choice(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_all(&self) -> Option<&AllRecord> {
        match &self.kind {
            RecordKind::All(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_repeat(&self) -> Option<&[Record]> {
        match &self.kind {
            RecordKind::Repeat(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[Record; 2]> {
        match &self.kind {
            RecordKind::Binary(pair) => Some(pair),
            _ => None,
        }
    }

    /// The committed characters of this record.
    pub fn symbols<C>(&self, input: &dyn Input<C>) -> Vec<C> {
        input::slice(input, self.begin, self.direct_end)
    }

    /// The committed text of this record.
    pub fn text(&self, input: &dyn Input<char>) -> String {
        input::slice_string(input, self.begin, self.direct_end)
    }

    /// Immediate children, in order, with the key each is stored under.
    pub fn children(&self) -> Vec<(Option<&Key>, &Record)> {
        match &self.kind {
            RecordKind::Span => vec![],
            RecordKind::Binary(pair) => pair.iter().map(|r| (None, r)).collect(),
            RecordKind::Choice(c) => c
                .child
                .as_deref()
                .map(|r| (c.key.as_ref(), r))
                .into_iter()
                .collect(),
            RecordKind::All(a) => a.iter().collect(),
            RecordKind::Repeat(items) => items.iter().map(|r| (None, r)).collect(),
        }
    }

    /// Depth-first pre-order traversal.
    ///
    /// `visit` receives the key the record is stored under in its parent (if
    /// any), the record itself, and its depth (the root is depth 0).
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(Option<&'a Key>, &'a Record, usize),
    {
        self.walk_at(None, 0, visit);
    }

    fn walk_at<'a, F>(&'a self, key: Option<&'a Key>, depth: usize, visit: &mut F)
    where
        F: FnMut(Option<&'a Key>, &'a Record, usize),
    {
        visit(key, self, depth);
        for (child_key, child) in self.children() {
            child.walk_at(child_key, depth + 1, visit);
        }
    }

    fn label(&self) -> String {
        match &self.kind {
            RecordKind::Span => "span".to_string(),
            RecordKind::Binary(_) => "pair".to_string(),
            RecordKind::Choice(c) => match c.index {
                Some(i) => format!("choice#{i}"),
                None => "choice".to_string(),
            },
            RecordKind::All(a) => {
                let keys = a.keys.iter().flatten().join(",");
                if keys.is_empty() {
                    "all".to_string()
                } else {
                    format!("all{{{keys}}}")
                }
            }
            RecordKind::Repeat(items) => format!("repeat×{}", items.len()),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, key: Option<&Key>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let key = key.map(|k| format!("[{k}] ")).unwrap_or_default();
        write!(
            f,
            "{indent}{key}{} {}..{}",
            self.label(),
            self.begin,
            self.direct_end
        )?;
        if self.greedy_end != self.direct_end {
            write!(f, " (reach {})", self.greedy_end)?;
        }
        writeln!(f)?;
        for (child_key, child) in self.children() {
            child.fmt_tree(f, child_key, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the record as an indented tree, one node per line.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, None, 0)
    }
}

/// Running maximum of `greedy_end` across the attempts of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach(usize);

impl Reach {
    pub fn new(begin: usize) -> Self {
        Self(begin)
    }

    pub fn absorb(&mut self, record: &Record) {
        self.0 = self.0.max(record.greedy_end);
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// What every pattern returns: a success flag plus a record that is usable
/// either way.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub success: bool,
    pub record: Record,
}

impl MatchResult {
    pub fn matched(record: Record) -> Self {
        Self {
            success: true,
            record,
        }
    }

    pub fn failed(record: Record) -> Self {
        Self {
            success: false,
            record,
        }
    }

    pub fn new(success: bool, record: Record) -> Self {
        Self { success, record }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
