use crate::{
    domain::submission::entity::{SubmissionForm, UploadedFile},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};

/// `POST /upload`: accept one storefront form submission and relay it as an email.
///
/// Text fields are collected as-is; the optional `file` part is read fully into
/// memory. A file part that carries neither a filename nor any bytes is treated
/// as "no attachment" (browsers submit such a part when the picker was left
/// empty). Validation and composition happen in the use case.
pub async fn submit_form(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        match field.name().unwrap_or("") {
            "email" => form.email = Some(field.text().await.map_err(read_error)?),
            "phone" => form.phone = Some(field.text().await.map_err(read_error)?),
            "name" => form.name = Some(field.text().await.map_err(read_error)?),
            "city" => form.city = Some(field.text().await.map_err(read_error)?),
            "area" => form.area = Some(field.text().await.map_err(read_error)?),
            "comment" => form.comment = Some(field.text().await.map_err(read_error)?),
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(read_error)?;
                if !file_name.is_empty() || !data.is_empty() {
                    form.attachment = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    state.submit.execute(form).await?;

    Ok(Json(serde_json::json!({
        "ok": true,
        "message": "Форма успішно надіслана!",
    })))
}

/// A read failure caused by the server body limit means the upload was larger
/// than anything we accept; everything else is a malformed stream.
fn read_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Internal(format!("multipart read failed: {}", err.body_text()))
    }
}
