pub mod repo;

use crate::error::{ProfileError, ProfileResult};
use crate::upload::{ImageUpload, StoreImage};
use repo::ProfileRepo;

use entrait::entrait_export as entrait;
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub name: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_date: OffsetDateTime,
}

/// The editable text fields of a profile. Absent fields are left untouched.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// Everything a single upsert writes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfileChanges {
    pub fields: ProfileFields,
    pub profile_picture_url: Option<String>,
}

/// A profile that is about to be created.
///
/// `joined_date` is left to the storage layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewProfile {
    pub user_id: UserId,
    pub name: String,
    pub handle: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl NewProfile {
    pub fn new(user_id: UserId, changes: ProfileChanges) -> ProfileResult<Self> {
        let ProfileChanges {
            fields,
            profile_picture_url,
        } = changes;

        Ok(Self {
            user_id,
            name: fields.name.ok_or(ProfileError::MissingField("name"))?,
            handle: fields.handle.ok_or(ProfileError::MissingField("handle"))?,
            bio: fields.bio,
            location: fields.location,
            website: fields.website,
            profile_picture_url,
        })
    }
}

#[entrait(pub FetchProfile, mock_api=FetchProfileMock)]
async fn fetch_profile(deps: &impl ProfileRepo, user_id: UserId) -> ProfileResult<Profile> {
    deps.find_profile(user_id)
        .await?
        .ok_or(ProfileError::ProfileNotFound)
}

#[entrait(pub UpsertProfile, mock_api=UpsertProfileMock)]
async fn upsert_profile(
    deps: &(impl ProfileRepo + StoreImage),
    user_id: UserId,
    fields: ProfileFields,
    image: Option<ImageUpload>,
) -> ProfileResult<Profile> {
    let profile_picture_url = match image {
        Some(image) => Some(deps.store_image(image).await?),
        None => None,
    };

    // The stored file is not rolled back if the merge fails.
    let stored_path = profile_picture_url.clone();

    deps.merge_profile(
        user_id,
        ProfileChanges {
            fields,
            profile_picture_url,
        },
    )
    .await
    .map_err(|error| {
        if let Some(path) = stored_path {
            tracing::warn!("upload {path} is orphaned after failed profile update");
        }
        error
    })
}
