//! Fuzzy Sample Matcher — best-effort substring heuristics that map a
//! free-text product description onto a Sample Library entry.
//!
//! This is deliberately not a scored ranking: the first entry in library
//! order that passes any containment test wins, and tests pin that order.
//! Replacing it with longest-match-wins would be a behavior change, not a
//! bug fix.

use crate::bom::models::BomDocument;
use crate::bom::samples::SampleLibrary;

/// Secondary category phrases checked when no library entry matches
/// directly. A hit resolves back to a library key containing either of the
/// phrase's first two words.
const CATEGORY_PHRASES: [&str; 5] = [
    "smart home temperature sensor",
    "performance running shoe",
    "smart coffee maker",
    "wireless earbuds",
    "ergonomic office chair",
];

/// Returns the first library document the description plausibly refers to,
/// or `None`. Case-insensitive.
///
/// An empty description matches nothing — without the guard, `"" ⊆ key`
/// would vacuously match the first entry. The pipeline also rejects empty
/// input upstream; this keeps the matcher safe on its own.
pub fn find_sample(
    library: &'static SampleLibrary,
    description: &str,
) -> Option<&'static BomDocument> {
    let desc = description.trim().to_lowercase();
    if desc.is_empty() {
        return None;
    }

    // Pass 1: three symmetric containment tests per entry, in library order.
    for (key, doc) in library.entries() {
        let name_prefix = first_two_words(&doc.product_name.to_lowercase());
        if desc.contains(key) || key.contains(&desc) || desc.contains(&name_prefix) {
            return Some(doc);
        }
    }

    // Pass 2: secondary category phrases, resolved by word containment.
    for phrase in CATEGORY_PHRASES {
        if desc.contains(phrase) || phrase.contains(&desc) {
            let mut words = phrase.split(' ');
            let first = words.next().unwrap_or_default();
            let second = words.next().unwrap_or_default();
            if let Some((_, doc)) = library
                .entries()
                .find(|(k, _)| k.contains(first) || k.contains(second))
            {
                return Some(doc);
            }
        }
    }

    None
}

fn first_two_words(s: &str) -> String {
    s.split(' ').take(2).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched_name(description: &str) -> Option<String> {
        find_sample(SampleLibrary::get(), description).map(|d| d.product_name.clone())
    }

    #[test]
    fn test_exact_key_matches() {
        assert_eq!(
            matched_name("smart home temperature sensor").as_deref(),
            Some("Smart Home Temperature Sensor")
        );
    }

    #[test]
    fn test_key_embedded_in_longer_description_matches() {
        assert_eq!(
            matched_name("I want a smart home temperature sensor with a display").as_deref(),
            Some("Smart Home Temperature Sensor")
        );
    }

    #[test]
    fn test_description_contained_in_key_matches() {
        // "wireless earbuds" contains "earbuds".
        assert_eq!(
            matched_name("earbuds").as_deref(),
            Some("Wireless Earbuds with ANC")
        );
    }

    #[test]
    fn test_product_name_first_two_words_match() {
        // "performance running" are the first two words of the shoe entry's
        // display name.
        assert_eq!(
            matched_name("a performance running sneaker for marathons").as_deref(),
            Some("Performance Running Shoe")
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            matched_name("SMART COFFEE MAKER").as_deref(),
            Some("12-Cup Smart Coffee Maker")
        );
    }

    #[test]
    fn test_first_match_in_library_order_wins() {
        // "smart" is contained in both the sensor and coffee maker keys; a
        // description contained in both must resolve to the earlier entry.
        assert_eq!(
            matched_name("smart").as_deref(),
            Some("Smart Home Temperature Sensor")
        );
    }

    #[test]
    fn test_empty_description_matches_nothing() {
        assert_eq!(matched_name(""), None);
        assert_eq!(matched_name("   "), None);
    }

    #[test]
    fn test_unrelated_description_matches_nothing() {
        assert_eq!(matched_name("orbital launch vehicle second stage"), None);
    }

    #[test]
    fn test_office_chair_matches() {
        assert_eq!(
            matched_name("an ergonomic office chair with lumbar support").as_deref(),
            Some("Ergonomic Office Chair with Lumbar Support")
        );
    }
}
