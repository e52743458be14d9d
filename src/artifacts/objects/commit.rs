//! Commit object
//!
//! Commits are immutable snapshots of the tracked file set. They carry:
//! - A tree: mapping from filename to blob fingerprint
//! - Parent fingerprint(s): one for ordinary commits, two for merges
//! - The commit message and timestamp
//!
//! ## Format
//!
//! On disk (canonical; the fingerprint is the SHA-1 of exactly these bytes):
//! ```text
//! commit <size>\0timestamp <unix-seconds> <offset>
//! parent <parent-fingerprint>
//! merged <second-parent-fingerprint>
//! file <blob-fingerprint> <filename>
//!
//! <commit message>
//! ```
//!
//! `parent` and `merged` lines are omitted when absent. `file` lines are
//! emitted in lexicographic filename order, which the `BTreeMap` tree
//! guarantees, so serialization is canonical.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message carried by the root commit of every repository
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Display pattern for commit dates, e.g. `Thu Jan 01 00:00:00 1970 +0000`
const DATE_DISPLAY_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Commit object
///
/// An immutable snapshot of the repository. Parents are linked by
/// fingerprint only; no in-memory parent pointers are kept.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message
    message: String,
    /// Wall-clock instant of creation
    timestamp: DateTime<FixedOffset>,
    /// Tracked files: filename -> blob fingerprint, lexicographic order
    tree: BTreeMap<String, ObjectId>,
    /// First parent fingerprint, absent for the initial commit
    parent: Option<ObjectId>,
    /// Second parent fingerprint, present for merge commits only
    second_parent: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        tree: BTreeMap<String, ObjectId>,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            tree,
            parent,
            second_parent,
        }
    }

    /// Create the root commit: epoch timestamp, empty tree, no parents
    pub fn initial() -> Self {
        let epoch = Utc
            .timestamp_opt(0, 0)
            .single()
            .unwrap_or_default()
            .fixed_offset();

        Commit {
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp: epoch,
            tree: BTreeMap::new(),
            parent: None,
            second_parent: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn tree(&self) -> &BTreeMap<String, ObjectId> {
        &self.tree
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// Iterate over the present parents, first parent first
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent.iter().chain(self.second_parent.iter())
    }

    /// Look up the blob fingerprint tracked for a filename
    pub fn tracked(&self, filename: &str) -> Option<&ObjectId> {
        self.tree.get(filename)
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    /// Format the timestamp for display, using the stored offset
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(DATE_DISPLAY_FORMAT).to_string()
    }

    /// Compute the commit's fingerprint (SHA-1 of the canonical serialization)
    pub fn fingerprint(&self) -> ObjectId {
        ObjectId::of_bytes(&self.serialize())
    }

    /// Serialize to the canonical on-disk form, header included
    pub fn serialize(&self) -> Bytes {
        let mut lines = vec![format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("merged {}", second_parent.as_ref()));
        }
        for (filename, blob_id) in &self.tree {
            lines.push(format!("file {} {}", blob_id.as_ref(), filename));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        let content = lines.join("\n");

        let mut record = Vec::new();
        let header = format!("commit {}\0", content.len());
        record.extend_from_slice(header.as_bytes());
        record.extend_from_slice(content.as_bytes());

        Bytes::from(record)
    }

    /// Deserialize from the canonical on-disk form
    pub fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader
            .read_until(b'\0', &mut header)
            .context("Invalid commit record: missing header")?;
        let header = String::from_utf8(header)?;
        if !header.starts_with("commit ") {
            anyhow::bail!("Invalid commit record: bad header {header:?}");
        }

        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit record: non-UTF-8 content")?;
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit record: missing timestamp line")?;
        let timestamp = parse_timestamp(
            timestamp_line
                .strip_prefix("timestamp ")
                .context("Invalid commit record: bad timestamp line")?,
        )?;

        let mut parent = None;
        let mut second_parent = None;
        let mut tree = BTreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(id) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(id.to_string())?);
            } else if let Some(id) = line.strip_prefix("merged ") {
                second_parent = Some(ObjectId::try_parse(id.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (blob_id, filename) = entry
                    .split_once(' ')
                    .context("Invalid commit record: bad file line")?;
                tree.insert(
                    filename.to_string(),
                    ObjectId::try_parse(blob_id.to_string())?,
                );
            } else {
                anyhow::bail!("Invalid commit record: unexpected line {line:?}");
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            message,
            timestamp,
            tree,
            parent,
            second_parent,
        })
    }

    /// Render the commit for log output
    ///
    /// ```text
    /// ===
    /// commit <fingerprint>
    /// Merge: <7-hex> <7-hex>      (merge commits only)
    /// Date: <E MMM dd HH:mm:ss yyyy Z>
    /// <message>
    /// ```
    pub fn display(&self, fingerprint: &ObjectId, writer: &mut impl Write) -> anyhow::Result<()> {
        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", fingerprint.as_ref())?;
        if let (Some(parent), Some(second_parent)) = (&self.parent, &self.second_parent) {
            writeln!(writer, "Merge: {} {}", parent.abbrev(), second_parent.abbrev())?;
        }
        writeln!(writer, "Date: {}", self.readable_timestamp())?;
        writeln!(writer, "{}", self.message)?;
        writeln!(writer)?;

        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = raw
        .split_once(' ')
        .context("Invalid commit record: bad timestamp value")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit record: bad timestamp seconds")?;
    let offset = parse_offset(offset)?;

    Utc.timestamp_opt(seconds, 0)
        .single()
        .map(|instant| instant.with_timezone(&offset))
        .context("Invalid commit record: timestamp out of range")
}

fn parse_offset(raw: &str) -> anyhow::Result<FixedOffset> {
    if raw.len() != 5 {
        anyhow::bail!("Invalid commit record: bad timezone offset {raw:?}");
    }

    let sign = match &raw[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid commit record: bad timezone sign {raw:?}"),
    };
    let hours = raw[1..3]
        .parse::<i32>()
        .context("Invalid commit record: bad timezone hours")?;
    let minutes = raw[3..5]
        .parse::<i32>()
        .context("Invalid commit record: bad timezone minutes")?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Invalid commit record: timezone offset out of range")
}
