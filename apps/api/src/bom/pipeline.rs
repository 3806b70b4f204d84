//! BOM Response Resolution Pipeline — decides, per request, whether to serve
//! a sample document, call the model, or fall back, and normalizes the final
//! shape returned to the caller.
//!
//! Policy: the caller always receives a usable document or an input error.
//! Model unavailability and unusable model output are recovered silently via
//! the Sample Library and logged only — "the AI failed" is never surfaced.

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::bom::extract::extract_bom;
use crate::bom::matcher::find_sample;
use crate::bom::models::{
    BomDocument, BomInput, BomRequest, ALLOWED_UPLOAD_TYPES, MAX_UPLOAD_BYTES,
};
use crate::bom::prompts::{build_image_prompt, build_text_prompt};
use crate::bom::samples::SampleLibrary;
use crate::errors::AppError;
use crate::llm_client::{ImagePayload, ModelAdapter};

/// Display name given to fallback documents served for image uploads, so the
/// response still reads like the output of a design analysis.
const ANALYZED_DESIGN_NAME: &str = "Analyzed Product Design";

/// Which terminal path produced a resolution. Logged and asserted on in
/// tests; never serialized to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    SampleMatch,
    LiveModel,
    Fallback,
}

/// Terminal outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolution {
    pub document: BomDocument,
    pub source: ResolutionSource,
}

/// Injectable index picker for the random fallback sample, so tests can pin
/// a deterministic choice.
pub trait SamplePicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Default picker: uniform over the library.
pub struct RandomPicker;

impl SamplePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Orchestrates one request: validate → shortcut → live call → fallback.
/// Holds no request state; safe to share across unlimited concurrent
/// requests.
pub struct ResolutionPipeline {
    library: &'static SampleLibrary,
    adapter: Option<Arc<dyn ModelAdapter>>,
    picker: Arc<dyn SamplePicker>,
}

impl ResolutionPipeline {
    pub fn new(
        library: &'static SampleLibrary,
        adapter: Option<Arc<dyn ModelAdapter>>,
        picker: Arc<dyn SamplePicker>,
    ) -> Self {
        Self {
            library,
            adapter,
            picker,
        }
    }

    pub async fn resolve(&self, request: BomRequest) -> Result<Resolution, AppError> {
        // Step 1: input validation. The only path that surfaces an error.
        self.validate(&request.input)?;

        // Step 2: quick-demo / sample-match shortcut. The model is never
        // invoked on this path.
        if let BomInput::Text(description) = &request.input {
            if let Some(doc) = find_sample(self.library, description) {
                info!("resolved from sample library match");
                return Ok(Resolution {
                    document: doc.clone(),
                    source: ResolutionSource::SampleMatch,
                });
            }
        }
        if request.quick_demo {
            info!("resolved via quick-demo shortcut");
            return Ok(Resolution {
                document: self.library.default_document().clone(),
                source: ResolutionSource::SampleMatch,
            });
        }

        // Step 3: no configured credentials — skip invocation entirely.
        let Some(adapter) = &self.adapter else {
            info!("no model credentials configured; serving fallback");
            return Ok(self.fallback(&request.input));
        };

        // Steps 4-5: live invocation; any failure falls back identically to
        // step 3 and is logged, never surfaced.
        let (prompt, image) = match &request.input {
            BomInput::Text(description) => (build_text_prompt(description), None),
            BomInput::Image(upload) => (
                build_image_prompt(),
                Some(ImagePayload::from_bytes(
                    upload.mime_type.clone(),
                    &upload.bytes,
                )),
            ),
        };

        let raw = match adapter.generate(&prompt, image.as_ref()).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("model invocation failed, serving fallback: {e}");
                return Ok(self.fallback(&request.input));
            }
        };

        match extract_bom(&raw) {
            Ok(document) => Ok(Resolution {
                document,
                source: ResolutionSource::LiveModel,
            }),
            Err(e) => {
                warn!("model reply failed extraction, serving fallback: {e}");
                Ok(self.fallback(&request.input))
            }
        }
    }

    fn validate(&self, input: &BomInput) -> Result<(), AppError> {
        match input {
            BomInput::Text(description) => {
                if description.trim().is_empty() {
                    return Err(AppError::Validation(
                        "Product description is required".to_string(),
                    ));
                }
            }
            BomInput::Image(upload) => {
                if !ALLOWED_UPLOAD_TYPES.contains(&upload.mime_type.as_str()) {
                    return Err(AppError::Validation(
                        "Unsupported file type. Please upload PNG, JPG, PDF, or SVG files."
                            .to_string(),
                    ));
                }
                if upload.bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::Validation(
                        "File too large. Maximum size is 10MB.".to_string(),
                    ));
                }
                info!(
                    "validated design upload: {} ({}, {} bytes)",
                    upload.filename,
                    upload.mime_type,
                    upload.bytes.len()
                );
            }
        }
        Ok(())
    }

    /// Shared fallback policy for steps 3 and 5: image input gets a
    /// picker-chosen sample relabeled as a design analysis; text input gets
    /// its matcher hit or the fixed default entry.
    fn fallback(&self, input: &BomInput) -> Resolution {
        let document = match input {
            BomInput::Image(_) => {
                let index = self.picker.pick(self.library.len());
                let mut doc = self.library.document_at(index).clone();
                doc.product_name = ANALYZED_DESIGN_NAME.to_string();
                doc
            }
            BomInput::Text(description) => find_sample(self.library, description)
                .unwrap_or_else(|| self.library.default_document())
                .clone(),
        };
        Resolution {
            document,
            source: ResolutionSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::bom::models::ImageUpload;
    use crate::llm_client::LlmError;

    enum FakeBehavior {
        Reply(String),
        Fail,
    }

    struct FakeAdapter {
        behavior: FakeBehavior,
        calls: AtomicUsize,
    }

    impl FakeAdapter {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                behavior: FakeBehavior::Reply(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                behavior: FakeBehavior::Fail,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelAdapter for FakeAdapter {
        async fn generate(
            &self,
            _prompt: &str,
            _image: Option<&ImagePayload>,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                FakeBehavior::Reply(text) => Ok(text.clone()),
                FakeBehavior::Fail => Err(LlmError::Api {
                    status: 529,
                    message: "overloaded".to_string(),
                }),
            }
        }
    }

    /// Picker that always returns a fixed index.
    struct FixedPicker(usize);

    impl SamplePicker for FixedPicker {
        fn pick(&self, _len: usize) -> usize {
            self.0
        }
    }

    fn pipeline_with(adapter: Option<Arc<FakeAdapter>>, picker_index: usize) -> ResolutionPipeline {
        ResolutionPipeline::new(
            SampleLibrary::get(),
            adapter.map(|a| a as Arc<dyn ModelAdapter>),
            Arc::new(FixedPicker(picker_index)),
        )
    }

    fn text_request(description: &str) -> BomRequest {
        BomRequest {
            input: BomInput::Text(description.to_string()),
            quick_demo: false,
        }
    }

    fn png_upload(size: usize) -> BomRequest {
        BomRequest {
            input: BomInput::Image(ImageUpload {
                bytes: Bytes::from(vec![0u8; size]),
                mime_type: "image/png".to_string(),
                filename: "design.png".to_string(),
            }),
            quick_demo: false,
        }
    }

    const VALID_REPLY: &str = r#"{
        "productName": "Drone Controller",
        "category": "Electronics",
        "bom": [
            {
                "partNumber": "STM32F103C8T6",
                "description": "ARM Cortex-M3 MCU",
                "material": "Silicon Chip",
                "quantity": 1,
                "unit": "piece",
                "estimatedCost": 2.8,
                "supplier": "Mouser",
                "leadTime": "4 weeks"
            }
        ],
        "totalMaterialCost": 2.8,
        "estimatedLaborCost": 3.0,
        "totalCost": 5.8,
        "estimatedRetailPrice": 19.99
    }"#;

    #[tokio::test]
    async fn test_sample_match_bypasses_model() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let resolution = pipeline
            .resolve(text_request("smart home temperature sensor"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::SampleMatch);
        assert_eq!(
            resolution.document.product_name,
            "Smart Home Temperature Sensor"
        );
        assert_eq!(resolution.document.bom.len(), 8);
        assert!((resolution.document.total_cost - 17.35).abs() < f64::EPSILON);
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_quick_demo_is_idempotent_and_skips_model() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let request = BomRequest {
            input: BomInput::Text("a product nothing in the library matches".to_string()),
            quick_demo: true,
        };

        let first = pipeline.resolve(request.clone()).await.unwrap();
        let second = pipeline.resolve(request).await.unwrap();

        assert_eq!(first.source, ResolutionSource::SampleMatch);
        assert_eq!(first.document, second.document);
        assert_eq!(
            first.document.product_name,
            "Smart Home Temperature Sensor"
        );
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_description_is_input_error_before_model() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let err = pipeline
            .resolve(text_request("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_disallowed_mime_type_is_input_error_before_model() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let request = BomRequest {
            input: BomInput::Image(ImageUpload {
                bytes: Bytes::from_static(b"GIF89a"),
                mime_type: "image/gif".to_string(),
                filename: "design.gif".to_string(),
            }),
            quick_demo: false,
        };

        let err = pipeline.resolve(request).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Unsupported file type")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_input_error_before_model() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let err = pipeline
            .resolve(png_upload(MAX_UPLOAD_BYTES + 1))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("File too large")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(adapter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_at_exactly_the_cap_is_accepted() {
        let pipeline = pipeline_with(None, 0);
        let resolution = pipeline.resolve(png_upload(MAX_UPLOAD_BYTES)).await.unwrap();
        assert_eq!(resolution.source, ResolutionSource::Fallback);
    }

    #[tokio::test]
    async fn test_no_credentials_text_without_match_serves_default() {
        let pipeline = pipeline_with(None, 0);

        let resolution = pipeline
            .resolve(text_request("quantum flux capacitor"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(
            resolution.document.product_name,
            "Smart Home Temperature Sensor"
        );
    }

    #[tokio::test]
    async fn test_no_credentials_image_serves_relabeled_sample() {
        // FixedPicker(3) selects the earbuds entry; only its name changes.
        let pipeline = pipeline_with(None, 3);

        let resolution = pipeline.resolve(png_upload(64)).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(resolution.document.product_name, "Analyzed Product Design");
        assert_eq!(resolution.document.category, "Audio Electronics");
        assert!(!resolution.document.bom.is_empty());
    }

    #[tokio::test]
    async fn test_live_model_result_is_returned_when_reply_is_valid() {
        let adapter = FakeAdapter::replying(VALID_REPLY);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let resolution = pipeline
            .resolve(text_request("a handheld drone controller"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::LiveModel);
        assert_eq!(resolution.document.product_name, "Drone Controller");
        assert_eq!(adapter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_silently() {
        let adapter = FakeAdapter::failing();
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let resolution = pipeline
            .resolve(text_request("a handheld drone controller"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(adapter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back_silently() {
        let adapter = FakeAdapter::replying("I cannot produce a BOM for that, sorry.");
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let resolution = pipeline
            .resolve(text_request("a handheld drone controller"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(
            resolution.document.product_name,
            "Smart Home Temperature Sensor"
        );
    }

    #[tokio::test]
    async fn test_schema_violation_falls_back_rather_than_propagating() {
        let reply = VALID_REPLY.replace(r#""supplier": "Mouser","#, "");
        let adapter = FakeAdapter::replying(&reply);
        let pipeline = pipeline_with(Some(adapter.clone()), 0);

        let resolution = pipeline
            .resolve(text_request("a handheld drone controller"))
            .await
            .unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(adapter.call_count(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_on_image_input_relabels_fallback() {
        let adapter = FakeAdapter::failing();
        let pipeline = pipeline_with(Some(adapter), 1);

        let resolution = pipeline.resolve(png_upload(64)).await.unwrap();

        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(resolution.document.product_name, "Analyzed Product Design");
        assert_eq!(resolution.document.category, "Athletic Footwear");
    }
}
