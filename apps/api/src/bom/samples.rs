//! Sample Library — the fixed set of pre-built BOM documents used as demo
//! content and as fallback data when the model is unavailable or replies
//! with garbage.
//!
//! Stored as an ordered list of `(key, document)` pairs, not a map: the
//! fuzzy matcher's first-match-wins semantics depend on iteration order.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::bom::models::BomDocument;

#[derive(Debug, Deserialize)]
struct RawEntry {
    key: String,
    document: BomDocument,
}

/// Process-wide, read-only library built once from the embedded asset.
pub struct SampleLibrary {
    entries: Vec<(String, BomDocument)>,
}

static LIBRARY: Lazy<SampleLibrary> = Lazy::new(|| {
    let raw: Vec<RawEntry> = serde_json::from_str(include_str!("../../data/sample_boms.json"))
        .expect("embedded sample library must be valid JSON");
    SampleLibrary {
        entries: raw.into_iter().map(|e| (e.key, e.document)).collect(),
    }
});

impl SampleLibrary {
    pub fn get() -> &'static SampleLibrary {
        &LIBRARY
    }

    /// Entries in insertion order. Keys are stored lowercase.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BomDocument)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn document_at(&self, index: usize) -> &BomDocument {
        &self.entries[index].1
    }

    /// The fixed entry served by quick-demo mode and as the last-resort
    /// text fallback: the first entry in library order.
    pub fn default_document(&self) -> &BomDocument {
        self.document_at(0)
    }
}
