//! src/routes/files.rs
use actix_web::{
    http::{header::ContentType, StatusCode},
    web, HttpResponse, ResponseError,
};

use crate::{
    reader::{FileContentReader, ReadError},
    routes::error_chain_fmt,
};

#[derive(thiserror::Error)]
#[error(transparent)]
pub struct FileError(#[from] ReadError);

impl std::fmt::Debug for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for FileError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            ReadError::NotFound { .. } | ReadError::OutsideBase { .. } => StatusCode::NOT_FOUND,
            ReadError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ReadError::IoFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Resolved paths stay in the logs, not in the response body.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::new(self.status_code())
    }
}

/// `GET /files/{name:.*}`: everything after `/files/` is the name.
#[tracing::instrument(name = "Serve an importer file", skip(reader))]
pub async fn serve_file(
    name: web::Path<String>,
    reader: web::Data<FileContentReader>,
) -> Result<HttpResponse, FileError> {
    // `?` turns a `ReadError` into a `FileError` via the `#[from]`.
    let content: String = reader.read_file_content(&name).await?;
    Ok(HttpResponse::Ok()
        // No MIME sniffing; everything goes out as text.
        .content_type(ContentType::plaintext())
        .body(content))
}
