//! Read-only supplier directory — reference data behind the supplier names
//! that appear in generated BOM line items. Loaded once from an embedded
//! asset, never mutated.

pub mod handlers;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub location: String,
    pub country: String,
    pub specialties: Vec<String>,
    pub lead_time_range: String,
    pub quality_rating: f64,
    pub price_range: String,
    pub certifications: Vec<String>,
    pub components: Vec<String>,
    pub description: String,
}

pub struct SupplierDirectory {
    suppliers: Vec<Supplier>,
}

static DIRECTORY: Lazy<SupplierDirectory> = Lazy::new(|| SupplierDirectory {
    suppliers: serde_json::from_str(include_str!("../../data/suppliers.json"))
        .expect("embedded supplier directory must be valid JSON"),
});

impl SupplierDirectory {
    pub fn get() -> &'static SupplierDirectory {
        &DIRECTORY
    }

    pub fn all(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn by_id(&self, id: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Case-insensitive substring lookup across component keywords and
    /// specialties.
    pub fn find_by_component(&self, component: &str) -> Vec<&Supplier> {
        let needle = component.to_lowercase();
        self.suppliers
            .iter()
            .filter(|s| {
                s.components
                    .iter()
                    .any(|c| c.to_lowercase().contains(&needle))
                    || s.specialties
                        .iter()
                        .any(|spec| spec.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_is_nonempty_and_ids_are_unique() {
        let directory = SupplierDirectory::get();
        assert!(!directory.all().is_empty());

        let mut ids: Vec<&str> = directory.all().iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), directory.all().len());
    }

    #[test]
    fn test_lookup_by_id() {
        let supplier = SupplierDirectory::get().by_id("sensor-dynamics-inc").unwrap();
        assert_eq!(supplier.name, "Sensor Dynamics Inc");
        assert_eq!(supplier.country, "USA");
    }

    #[test]
    fn test_unknown_id_is_none() {
        assert!(SupplierDirectory::get().by_id("no-such-supplier").is_none());
    }

    #[test]
    fn test_find_by_component_matches_component_keywords() {
        let hits = SupplierDirectory::get().find_by_component("temperature sensor");
        assert!(hits.iter().any(|s| s.id == "sensor-dynamics-inc"));
    }

    #[test]
    fn test_find_by_component_matches_specialties_case_insensitively() {
        let hits = SupplierDirectory::get().find_by_component("FOAM");
        assert!(hits.iter().any(|s| s.id == "foam-solutions-ltd"));
    }

    #[test]
    fn test_find_by_component_with_no_match_is_empty() {
        assert!(SupplierDirectory::get()
            .find_by_component("antimatter containment")
            .is_empty());
    }
}
