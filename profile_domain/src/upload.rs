use crate::error::ProfileResult;
use crate::GetCurrentTime;

use entrait::entrait_export as entrait;
use std::path::Path;
use time::OffsetDateTime;

/// URL prefix under which stored uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// An uploaded image file, as received.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: bytes::Bytes,
}

impl ImageUpload {
    /// File name the upload is stored under: `<unix-millis>_<original-name>`.
    ///
    /// Only the last path component of the client-supplied name is kept.
    pub fn stored_file_name(&self, uploaded_at: OffsetDateTime) -> String {
        let original = Path::new(&self.file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("upload");

        let millis = uploaded_at.unix_timestamp_nanos() / 1_000_000;

        format!("{millis}_{original}")
    }
}

/// Access to the directory uploads are written to.
pub trait GetUploadDir {
    fn get_upload_dir(&self) -> &Path;
}

impl<T: GetUploadDir> GetUploadDir for ::entrait::Impl<T> {
    fn get_upload_dir(&self) -> &Path {
        (**self).get_upload_dir()
    }
}

// Needed for unmocking `store_image` inside partial mocks.
impl GetUploadDir for unimock::Unimock {
    fn get_upload_dir(&self) -> &Path {
        Path::new("uploads")
    }
}

/// Persist an uploaded image and return the path it is served under.
#[entrait(pub StoreImage, mock_api=StoreImageMock)]
async fn store_image(
    deps: &(impl GetUploadDir + GetCurrentTime),
    image: ImageUpload,
) -> ProfileResult<String> {
    write_image(deps.get_upload_dir(), deps.get_current_time(), image).await
}

async fn write_image(
    upload_dir: &Path,
    uploaded_at: OffsetDateTime,
    image: ImageUpload,
) -> ProfileResult<String> {
    let file_name = image.stored_file_name(uploaded_at);

    tokio::fs::write(upload_dir.join(&file_name), &image.bytes).await?;
    tracing::debug!("stored upload {file_name} ({} bytes)", image.bytes.len());

    Ok(format!(
        "{UPLOADS_PREFIX}/{}",
        urlencoding::encode(&file_name)
    ))
}
