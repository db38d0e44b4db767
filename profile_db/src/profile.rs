use crate::GetDb;

use profile_domain::error::ProfileResult;
use profile_domain::profile::repo::ProfileRepoImpl;
use profile_domain::profile::{NewProfile, Profile, ProfileChanges, UserId};

use entrait::*;
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    name: String,
    handle: String,
    bio: Option<String>,
    location: Option<String>,
    website: Option<String>,
    profile_picture_url: Option<String>,
    joined_date: OffsetDateTime,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            name: row.name,
            handle: row.handle,
            bio: row.bio,
            location: row.location,
            website: row.website,
            profile_picture_url: row.profile_picture_url,
            joined_date: row.joined_date,
        }
    }
}

pub struct PgProfileRepo;

#[entrait]
impl ProfileRepoImpl for PgProfileRepo {
    pub async fn find_profile(
        deps: &impl GetDb,
        UserId(user_id): UserId,
    ) -> ProfileResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, name, handle, bio, location, website, profile_picture_url, joined_date
            FROM app.profile
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&deps.get_db().pg_pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    pub async fn merge_profile(
        deps: &impl GetDb,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> ProfileResult<Profile> {
        let mut tx = deps.get_db().pg_pool.begin().await?;

        let updated = sqlx::query_as::<_, ProfileRow>(
            // language=PostgreSQL
            r#"
            UPDATE app.profile SET
                name = COALESCE($2, name),
                handle = COALESCE($3, handle),
                bio = COALESCE($4, bio),
                location = COALESCE($5, location),
                website = COALESCE($6, website),
                profile_picture_url = COALESCE($7, profile_picture_url)
            WHERE user_id = $1
            RETURNING user_id, name, handle, bio, location, website, profile_picture_url, joined_date
            "#,
        )
        .bind(&user_id.0)
        .bind(&changes.fields.name)
        .bind(&changes.fields.handle)
        .bind(&changes.fields.bio)
        .bind(&changes.fields.location)
        .bind(&changes.fields.website)
        .bind(&changes.profile_picture_url)
        .fetch_optional(&mut *tx)
        .await?;

        let row = match updated {
            Some(row) => row,
            None => {
                let new_profile = NewProfile::new(user_id, changes)?;

                // A concurrent first upsert may have inserted the row in the meantime,
                // the primary key turns that into an update.
                sqlx::query_as::<_, ProfileRow>(
                    // language=PostgreSQL
                    r#"
                    INSERT INTO app.profile AS profile
                        (user_id, name, handle, bio, location, website, profile_picture_url)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ON CONFLICT (user_id) DO UPDATE SET
                        name = EXCLUDED.name,
                        handle = EXCLUDED.handle,
                        bio = COALESCE(EXCLUDED.bio, profile.bio),
                        location = COALESCE(EXCLUDED.location, profile.location),
                        website = COALESCE(EXCLUDED.website, profile.website),
                        profile_picture_url = COALESCE(EXCLUDED.profile_picture_url, profile.profile_picture_url)
                    RETURNING user_id, name, handle, bio, location, website, profile_picture_url, joined_date
                    "#,
                )
                .bind(new_profile.user_id.0)
                .bind(new_profile.name)
                .bind(new_profile.handle)
                .bind(new_profile.bio)
                .bind(new_profile.location)
                .bind(new_profile.website)
                .bind(new_profile.profile_picture_url)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(row.into())
    }
}
