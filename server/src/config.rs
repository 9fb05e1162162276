use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

/// Which of the two deployments this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRole {
    Admin,
    Visitor,
}

impl FromStr for ServerRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "visitor" => Ok(Self::Visitor),
            other => Err(format!("unknown server role: {other}")),
        }
    }
}

pub struct Config {
    pub port: u16,
    pub role: ServerRole,
    pub database_url: String,
    pub media: MediaConfig,
    pub directory: DirectoryConfig,
    /// Shared secret the identity provider signs bearer tokens with.
    pub auth_secret: String,
}

#[derive(Clone)]
pub struct MediaConfig {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub upload_expiry_secs: u64,
    pub download_expiry_secs: u64,
}

#[derive(Clone)]
pub struct DirectoryConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Directory group whose members are organizer candidates.
    pub organizer_group_id: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            role: try_load("SERVER_ROLE", "admin"),
            database_url: read_secret("DATABASE_URL"),
            media: MediaConfig {
                endpoint: try_load("MEDIA_ENDPOINT", "http://minio:9000"),
                region: try_load("MEDIA_REGION", "us-east-1"),
                bucket: try_load("MEDIA_BUCKET", "project-media"),
                access_key: read_secret("MEDIA_ACCESS_KEY"),
                secret_key: read_secret("MEDIA_SECRET_KEY"),
                upload_expiry_secs: try_load("MEDIA_UPLOAD_EXPIRY_SECS", "60"),
                download_expiry_secs: try_load("MEDIA_DOWNLOAD_EXPIRY_SECS", "86400"),
            },
            directory: DirectoryConfig {
                tenant_id: try_load("GRAPH_TENANT_ID", ""),
                client_id: try_load("GRAPH_CLIENT_ID", ""),
                client_secret: read_secret("GRAPH_CLIENT_SECRET"),
                organizer_group_id: try_load("GRAPH_ORGANIZER_GROUP_ID", ""),
            },
            auth_secret: read_secret("AUTH_TOKEN_SECRET"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}
