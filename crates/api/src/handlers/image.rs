//! Handler for `POST /api/images/upload`.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use nzwalks_core::image::{Image, ImageUploadRequest, UploadedFile};
use nzwalks_core::mapping::image_to_dto;
use nzwalks_core::roles::{authorize, WRITE_ACCESS};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/images/upload
///
/// Multipart fields: `file`, `fileName`, `fileDescription`. Unknown fields are
/// ignored. Every validation failure is reported at once; nothing is stored
/// unless the upload is valid.
pub async fn upload_image(
    AuthUser(ctx): AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    authorize(&ctx, WRITE_ACCESS)?;
    let request = read_form(multipart?).await?;
    let upload = request.into_upload()?;

    let stored = state
        .images
        .store(&upload.bytes, &upload.file_name, &upload.extension)
        .await?;

    let image = Image {
        id: Uuid::new_v4(),
        file_size_in_bytes: upload.bytes.len() as u64,
        file_name: upload.file_name,
        file_description: upload.file_description,
        file_extension: upload.extension,
        file_path: stored.url,
    };

    tracing::info!(
        image_id = %image.id,
        file = %image.file_path,
        size = image.file_size_in_bytes,
        subject = %ctx.subject,
        "Image uploaded"
    );
    Ok(Json(image_to_dto(&image)))
}

async fn read_form(mut multipart: Multipart) -> AppResult<ImageUploadRequest> {
    let mut request = ImageUploadRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                request.file = Some(UploadedFile {
                    name: file_name,
                    bytes,
                });
            }
            "fileName" => request.file_name = Some(field.text().await?),
            "fileDescription" => request.file_description = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(request)
}
