use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use imagefx_core::Operation;

/// Body of the 500 response when the engine rejects an upload. The message
/// and diagnostic trace are surfaced to the caller as-is.
#[derive(Debug, Serialize)]
struct ProcessingFailure {
    error: String,
    stack: String,
}

/// POST /processImage
///
/// Apply one named transformation to an uploaded image.
///
/// Form fields:
/// - image: binary file data
/// - operation: one of the identifiers listed by GET /
///
/// Responds 200 with JPEG bytes, 400 for an unknown operation or missing
/// upload, 500 with a JSON error payload when processing fails.
pub async fn process_image(mut multipart: Multipart) -> Response {
    let mut image_data: Option<Vec<u8>> = None;
    let mut operation: Option<String> = None;

    // Parse multipart form
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        };

        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let bytes = match field.bytes().await {
                    Ok(b) => b,
                    Err(_) => return StatusCode::BAD_REQUEST.into_response(),
                };
                image_data = Some(bytes.to_vec());
            }
            "operation" => {
                if let Ok(text) = field.text().await {
                    operation = Some(text);
                }
            }
            _ => {}
        }
    }

    // A missing operation field is treated like any unrecognized identifier.
    let op = match operation.as_deref().unwrap_or("").parse::<Operation>() {
        Ok(op) => op,
        Err(_) => {
            log::warn!(
                "invalid operation requested: {:?}",
                operation.as_deref().unwrap_or("")
            );
            return (StatusCode::BAD_REQUEST, "Invalid operation").into_response();
        }
    };

    let Some(data) = image_data else {
        log::warn!("{op}: request is missing the image upload");
        return (StatusCode::BAD_REQUEST, "Missing image upload").into_response();
    };

    log::info!("applying operation: {op}");

    match imagefx_core::apply(op, &data) {
        Ok(jpeg) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/jpeg")], jpeg).into_response(),
        Err(e) => {
            log::error!("{op} failed: {e}");
            let failure = ProcessingFailure {
                error: e.to_string(),
                stack: format!("{e:?}"),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(failure)).into_response()
        }
    }
}
