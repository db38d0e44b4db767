use profile_domain::error::ProfileResult;
use profile_domain::profile::repo::{DelegateProfileRepo, ProfileRepoImpl};
use profile_domain::profile::{NewProfile, Profile, ProfileChanges, UserId};
use profile_domain::upload::GetUploadDir;

use axum::http::header::*;
use axum::http::StatusCode;
use axum::{body::Body, http::Request};
use bytes::Bytes;
use entrait::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const BOUNDARY: &str = "profile-test-boundary";

pub trait WithJsonBody<B: Serialize> {
    fn with_json_body(self, body: B) -> Request<Body>;
}

impl<B: Serialize> WithJsonBody<B> for axum::http::request::Builder {
    fn with_json_body(self, body: B) -> Request<Body> {
        self.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }
}

/// A `profilePicture` part of a multipart body: `(file_name, content)`.
pub type FilePart<'a> = (&'a str, &'a [u8]);

pub trait WithMultipartBody {
    fn with_multipart_body(
        self,
        fields: &[(&str, &str)],
        profile_pictures: &[FilePart],
    ) -> Request<Body>;
}

impl WithMultipartBody for axum::http::request::Builder {
    fn with_multipart_body(
        self,
        fields: &[(&str, &str)],
        profile_pictures: &[FilePart],
    ) -> Request<Body> {
        let mut body = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        for (file_name, content) in profile_pictures {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"profilePicture\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        self.header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
    }
}

pub trait EmptyBody {
    fn empty_body(self) -> Request<Body>;
}

impl EmptyBody for axum::http::request::Builder {
    fn empty_body(self) -> Request<Body> {
        self.body(Body::empty()).unwrap()
    }
}

pub async fn request(router: axum::Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => (status, bytes),
        Err(_) => panic!("error while fetching body"),
    }
}

pub async fn request_json<B: DeserializeOwned>(
    router: axum::Router,
    request: Request<Body>,
) -> Result<(StatusCode, B), (StatusCode, Bytes)> {
    let (status, bytes) = self::request(router, request).await;
    serde_json::from_slice(&bytes)
        .map(|body| (status, body))
        .map_err(|_| (status, bytes))
}

///
/// An app that keeps profiles in memory and writes uploads to a temporary directory.
///
#[derive(Clone)]
pub struct TestApp {
    upload_dir: Arc<tempfile::TempDir>,
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            upload_dir: Arc::new(tempfile::tempdir().unwrap()),
            profiles: Default::default(),
        }
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

impl GetUploadDir for TestApp {
    fn get_upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }
}

pub trait GetProfiles {
    fn get_profiles(&self) -> &Mutex<HashMap<UserId, Profile>>;
}

impl GetProfiles for Impl<TestApp> {
    fn get_profiles(&self) -> &Mutex<HashMap<UserId, Profile>> {
        &self.profiles
    }
}

impl DelegateProfileRepo<Self> for TestApp {
    type Target = MemoryProfileRepo;
}

pub struct MemoryProfileRepo;

#[entrait]
impl ProfileRepoImpl for MemoryProfileRepo {
    pub async fn find_profile(
        deps: &impl GetProfiles,
        user_id: UserId,
    ) -> ProfileResult<Option<Profile>> {
        Ok(deps.get_profiles().lock().unwrap().get(&user_id).cloned())
    }

    pub async fn merge_profile(
        deps: &impl GetProfiles,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> ProfileResult<Profile> {
        let mut profiles = deps.get_profiles().lock().unwrap();

        let profile = match profiles.get(&user_id) {
            Some(existing) => {
                let ProfileChanges {
                    fields,
                    profile_picture_url,
                } = changes;
                let existing = existing.clone();

                Profile {
                    name: fields.name.unwrap_or(existing.name),
                    handle: fields.handle.unwrap_or(existing.handle),
                    bio: fields.bio.or(existing.bio),
                    location: fields.location.or(existing.location),
                    website: fields.website.or(existing.website),
                    profile_picture_url: profile_picture_url.or(existing.profile_picture_url),
                    ..existing
                }
            }
            None => {
                let new_profile = NewProfile::new(user_id.clone(), changes)?;

                Profile {
                    user_id: new_profile.user_id,
                    name: new_profile.name,
                    handle: new_profile.handle,
                    bio: new_profile.bio,
                    location: new_profile.location,
                    website: new_profile.website,
                    profile_picture_url: new_profile.profile_picture_url,
                    joined_date: time::OffsetDateTime::UNIX_EPOCH,
                }
            }
        };

        profiles.insert(user_id, profile.clone());

        Ok(profile)
    }
}
