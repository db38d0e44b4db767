use crate::config::Config;
use profile_db::Db;

use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct App {
    pub config: Arc<Config>,
    pub db: Db,
}

impl profile_db::GetDb for App {
    fn get_db(&self) -> &Db {
        &self.db
    }
}

impl profile_domain::upload::GetUploadDir for App {
    fn get_upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }
}

impl profile_domain::profile::repo::DelegateProfileRepo<Self> for App {
    type Target = profile_db::profile::PgProfileRepo;
}
