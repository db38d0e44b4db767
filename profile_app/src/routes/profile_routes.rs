use crate::form::ProfileForm;
use profile_domain::error::ProfileResult;
use profile_domain::profile::{FetchProfile, Profile, UpsertProfile, UserId};

use axum::extract::{Extension, Path};
use axum::routing::get;
use axum::Json;

pub struct ProfileRoutes<D>(std::marker::PhantomData<D>);

impl<D> ProfileRoutes<D>
where
    D: FetchProfile + UpsertProfile + Sized + Clone + Send + Sync + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new().route(
            "/profiles/:user_id",
            get(Self::get_profile).put(Self::put_profile),
        )
    }

    async fn get_profile(
        Extension(deps): Extension<D>,
        Path(user_id): Path<String>,
    ) -> ProfileResult<Json<Profile>> {
        Ok(Json(deps.fetch_profile(UserId(user_id)).await?))
    }

    async fn put_profile(
        Extension(deps): Extension<D>,
        Path(user_id): Path<String>,
        form: ProfileForm,
    ) -> ProfileResult<Json<Profile>> {
        Ok(Json(
            deps.upsert_profile(UserId(user_id), form.fields, form.image)
                .await?,
        ))
    }
}
