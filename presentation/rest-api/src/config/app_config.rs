use super::{cors_config, server_config::ServerConfig, upload_config::UploadConfig};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub upload: UploadConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            upload: UploadConfig::from_env(),
        }
    }
}
