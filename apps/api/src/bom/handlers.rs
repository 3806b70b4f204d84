//! Axum route handlers for the BOM generation API.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Json,
};

use crate::bom::models::{BomDocument, BomInput, BomRequest, GenerateBomBody, ImageUpload};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/bom/generate
///
/// Accepts either a JSON body (`{"productDescription": "...",
/// "useQuickDemo": false}`) or a multipart form with a `file` field, matching
/// on the Content-Type header. Always responds with a full `BomDocument` or
/// a 400-class `{"error": "..."}`.
pub async fn handle_generate(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<BomDocument>, AppError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let bom_request = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|_| AppError::Validation("Malformed multipart request".to_string()))?;
        read_upload(multipart).await?
    } else {
        let Json(body) = Json::<GenerateBomBody>::from_request(request, &state)
            .await
            .map_err(|_| AppError::Validation("Invalid JSON request body".to_string()))?;
        BomRequest {
            input: BomInput::Text(body.product_description.unwrap_or_default()),
            quick_demo: body.use_quick_demo,
        }
    };

    let resolution = state.pipeline.resolve(bom_request).await?;
    Ok(Json(resolution.document))
}

/// Pulls the `file` field out of a multipart upload. MIME type and size are
/// validated downstream by the pipeline; this only enforces presence.
async fn read_upload(mut multipart: Multipart) -> Result<BomRequest, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Malformed multipart request".to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("Failed to read uploaded file".to_string()))?;
            return Ok(BomRequest {
                input: BomInput::Image(ImageUpload {
                    bytes,
                    mime_type,
                    filename,
                }),
                quick_demo: false,
            });
        }
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
