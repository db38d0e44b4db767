use anyhow::Context;
use sqlx::PgPool;

pub mod profile;

#[derive(Clone)]
pub struct Db {
    pub pg_pool: PgPool,
}

impl Db {
    pub async fn init(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pg_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context("could not connect to database_url")?;

        sqlx::migrate!("../migrations")
            .run(&pg_pool)
            .await
            .context("failed to run database migrations")?;

        tracing::info!("database ready");

        Ok(Db { pg_pool })
    }
}

pub trait GetDb {
    fn get_db(&self) -> &Db;
}

impl GetDb for Db {
    fn get_db(&self) -> &Db {
        self
    }
}

impl<T: GetDb> GetDb for ::entrait::Impl<T> {
    fn get_db(&self) -> &Db {
        (**self).get_db()
    }
}

#[cfg(test)]
impl profile_domain::profile::repo::DelegateProfileRepo<Self> for Db {
    type Target = profile::PgProfileRepo;
}

/// A fresh, migrated database for the calling test thread.
#[cfg(test)]
async fn create_test_db() -> entrait::Impl<Db> {
    use sha2::Digest;
    use sqlx::Connection;

    let thread_name = std::thread::current()
        .name()
        .unwrap_or("main")
        .to_string();
    let thread_hash = hex::encode(sha2::Sha256::digest(thread_name.as_bytes()));
    let db_name = format!("profile_test_{}", &thread_hash[..16]);

    let server_url = database_server_url();
    let mut admin = sqlx::PgConnection::connect(server_url.as_str())
        .await
        .unwrap();

    for statement in [
        format!(r#"DROP DATABASE IF EXISTS "{db_name}""#),
        format!(r#"CREATE DATABASE "{db_name}""#),
    ] {
        sqlx::query(&statement).execute(&mut admin).await.unwrap();
    }
    admin.close().await.unwrap();

    let mut db_url = server_url;
    db_url.set_path(&db_name);

    entrait::Impl::new(Db::init(db_url.as_str(), 4).await.unwrap())
}

/// `DATABASE_URL` without its database name.
#[cfg(test)]
fn database_server_url() -> url::Url {
    dotenv::dotenv().ok();

    let mut url: url::Url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set")
        .parse()
        .expect("malformed DATABASE_URL");
    url.set_path("");

    url
}
