use profile_domain::error::{ProfileError, ProfileResult};
use profile_domain::profile::ProfileFields;
use profile_domain::upload::ImageUpload;

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;

const PROFILE_PICTURE_FIELD: &str = "profilePicture";

/// Body of a profile update.
///
/// Accepts `multipart/form-data` (text fields plus an optional `profilePicture` file)
/// or a JSON object with the text fields. Any other body changes nothing.
#[derive(Default)]
pub struct ProfileForm {
    pub fields: ProfileFields,
    pub image: Option<ImageUpload>,
}

#[async_trait::async_trait]
impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = ProfileError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with(mime::MULTIPART_FORM_DATA.as_ref()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| {
                    ProfileError::InvalidBody(rejection.status(), rejection.body_text())
                })?;

            read_multipart(multipart).await
        } else if content_type.starts_with(mime::APPLICATION_JSON.as_ref()) {
            let Json(fields) = Json::<ProfileFields>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    ProfileError::InvalidBody(rejection.status(), rejection.body_text())
                })?;

            Ok(Self {
                fields,
                image: None,
            })
        } else {
            Ok(Self::default())
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> ProfileResult<ProfileForm> {
    let mut form = ProfileForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .file_name()
            .filter(|file_name| !file_name.is_empty())
            .map(str::to_string);

        let slot = match name.as_str() {
            "name" => &mut form.fields.name,
            "handle" => &mut form.fields.handle,
            "bio" => &mut form.fields.bio,
            "location" => &mut form.fields.location,
            "website" => &mut form.fields.website,
            PROFILE_PICTURE_FIELD => {
                // Only the first uploaded file counts.
                match file_name {
                    Some(file_name) if form.image.is_none() => {
                        let bytes = field.bytes().await.map_err(bad_multipart)?;
                        form.image = Some(ImageUpload { file_name, bytes });
                    }
                    _ => {}
                }
                continue;
            }
            _ => continue,
        };

        *slot = Some(field.text().await.map_err(bad_multipart)?);
    }

    Ok(form)
}

fn bad_multipart(error: MultipartError) -> ProfileError {
    ProfileError::InvalidBody(error.status(), error.body_text())
}
