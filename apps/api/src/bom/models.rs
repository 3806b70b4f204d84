//! Wire types for BOM generation. Field names stay camelCase on the wire to
//! match the JSON schema the model is prompted to produce.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// MIME types accepted for design uploads.
pub const ALLOWED_UPLOAD_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/svg+xml",
    "application/pdf",
];

/// Upload size cap: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// The eight mandatory line-item fields, in document order. The extractor
/// reports the first one missing, so order matters.
pub const MANDATORY_ITEM_FIELDS: [&str; 8] = [
    "partNumber",
    "description",
    "material",
    "quantity",
    "unit",
    "estimatedCost",
    "supplier",
    "leadTime",
];

/// One row of a Bill of Materials. Every field is mandatory; a missing field
/// is an extraction failure, never defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    pub part_number: String,
    pub description: String,
    pub material: String,
    pub quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
    pub supplier: String,
    pub lead_time: String,
}

/// A complete Bill of Materials with cost rollups.
///
/// Cost coherence (`totalCost ≈ totalMaterialCost + estimatedLaborCost`) is a
/// soft invariant owned by whoever produced the document; the pipeline never
/// recomputes or corrects the rollups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomDocument {
    pub product_name: String,
    pub category: String,
    pub bom: Vec<BomItem>,
    pub total_material_cost: f64,
    pub estimated_labor_cost: f64,
    pub total_cost: f64,
    pub estimated_retail_price: f64,
}

/// An uploaded design file, held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub mime_type: String,
    pub filename: String,
}

/// Exactly one input payload per request: a text description or an image.
#[derive(Debug, Clone)]
pub enum BomInput {
    Text(String),
    Image(ImageUpload),
}

/// One inbound generation request. Created per call, discarded after
/// producing one document.
#[derive(Debug, Clone)]
pub struct BomRequest {
    pub input: BomInput,
    pub quick_demo: bool,
}

/// JSON body of `POST /api/v1/bom/generate` in text mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBomBody {
    pub product_description: Option<String>,
    /// Accepted as both `useQuickDemo` (historical) and `quickDemo`.
    #[serde(default, alias = "quickDemo")]
    pub use_quick_demo: bool,
}
