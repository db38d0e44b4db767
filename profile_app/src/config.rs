use std::path::PathBuf;

#[derive(clap::Parser)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[arg(long, env, default_value_t = 5002)]
    pub port: u16,

    #[arg(long, env)]
    pub database_url: String,

    #[arg(long, env, default_value_t = 50)]
    pub database_max_connections: u32,

    /// Directory uploaded profile pictures are written to and served from.
    #[arg(long, env, default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted request body, in bytes.
    #[arg(long, env, default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}
