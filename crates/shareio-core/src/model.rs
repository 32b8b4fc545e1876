//! Share, file and identity types.
//!
//! Shares arrive from the realtime store keyed by share id:
//!
//! ```json
//! { "1699999999": { "createdAt": 1699999999000, "expiresAt": null,
//!                   "files": [{ "name": "a.pdf", "size": 1024, "type": "application/pdf", "url": "..." }] } }
//! ```
//!
//! [`normalize_shares`] flattens that into one [`FileRecord`] per file.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// =============================================================================
// Identity
// =============================================================================

/// Authenticated admin identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Backend user id.
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Bearer token for data store requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl Identity {
    /// Name used in welcome messages (display name, else email).
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.email)
    }

    /// Local part of the email, shown in the header.
    pub fn handle(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

// =============================================================================
// Shares
// =============================================================================

/// One file inside a share.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub name: String,
    /// Declared size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type.
    #[serde(default, rename = "type")]
    pub mime_type: String,
    /// Download URL.
    #[serde(default)]
    pub url: String,
}

/// A batch of files uploaded together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    /// Creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Expiry time in epoch milliseconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_slots")]
    pub files: FileSlots,
}

/// File entries with their positional indices.
///
/// The store keeps `files` as an array, but an array with holes comes back
/// either with `null` slots or as an object keyed by index. Both decode to
/// the same slots, keeping the original index of every entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileSlots(pub Vec<(usize, FileEntry)>);

impl FileSlots {
    pub fn from_entries(entries: Vec<FileEntry>) -> Self {
        Self(entries.into_iter().enumerate().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, FileEntry)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FileSlots {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.0.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        let mut dense: Vec<Option<&FileEntry>> = vec![None; len];
        for (index, entry) in &self.0 {
            dense[*index] = Some(entry);
        }
        dense.serialize(serializer)
    }
}

fn deserialize_slots<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FileSlots, D::Error> {
    deserializer.deserialize_any(SlotsVisitor)
}

struct SlotsVisitor;

impl<'de> Visitor<'de> for SlotsVisitor {
    type Value = FileSlots;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array of files or an object keyed by file index")
    }

    fn visit_unit<E: de::Error>(self) -> Result<FileSlots, E> {
        Ok(FileSlots::default())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FileSlots, A::Error> {
        let mut slots = Vec::new();
        let mut index = 0;
        while let Some(entry) = seq.next_element::<Option<FileEntry>>()? {
            if let Some(entry) = entry {
                slots.push((index, entry));
            }
            index += 1;
        }
        Ok(FileSlots(slots))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileSlots, A::Error> {
        let mut slots = Vec::new();
        while let Some((key, entry)) = map.next_entry::<String, Option<FileEntry>>()? {
            let index = key
                .parse::<usize>()
                .map_err(|_| de::Error::custom(format!("file index '{}' is not a number", key)))?;
            if let Some(entry) = entry {
                slots.push((index, entry));
            }
        }
        slots.sort_by_key(|(index, _)| *index);
        Ok(FileSlots(slots))
    }
}

// =============================================================================
// Flattened records
// =============================================================================

/// One file joined with its share's metadata, as listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// `"{share_id}-{file_index}"`.
    pub id: String,
    pub share_id: String,
    pub file_index: usize,
    pub created_at: i64,
    pub expires_at: Option<i64>,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub url: String,
}

impl FileRecord {
    pub fn record_id(share_id: &str, file_index: usize) -> String {
        format!("{}-{}", share_id, file_index)
    }
}

/// Flatten a `shares` snapshot into file records.
///
/// Shares are visited in key order and files in index order. A share without
/// `createdAt` is stamped with `now_ms`. Shares that fail to decode are
/// skipped with a warning rather than failing the whole snapshot.
pub fn normalize_shares(snapshot: Option<&Value>, now_ms: i64) -> Vec<FileRecord> {
    let Some(Value::Object(shares)) = snapshot else {
        return Vec::new();
    };

    let ordered: BTreeMap<&String, &Value> = shares.iter().collect();
    let mut records = Vec::new();

    for (share_id, raw) in ordered {
        let share = match Share::deserialize(raw) {
            Ok(share) => share,
            Err(e) => {
                warn!(share_id = %share_id, error = %e, "skipping malformed share");
                continue;
            }
        };
        let created_at = share.created_at.unwrap_or(now_ms);

        records.extend(share.files.iter().map(|(index, file)| FileRecord {
            id: FileRecord::record_id(share_id, *index),
            share_id: share_id.clone(),
            file_index: *index,
            created_at,
            expires_at: share.expires_at,
            name: file.name.clone(),
            size: file.size,
            mime_type: file.mime_type.clone(),
            url: file.url.clone(),
        }));
    }

    records
}
