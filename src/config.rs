use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub forecast: ForecastConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080, request_timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Seed for the placeholder series RNG (None = entropy).
    pub random_seed: Option<u64>,
}

impl ForecastConfig {
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding model.onnx and scaler.json (or scalar.json).
    pub artifacts_dir: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { artifacts_dir: PathBuf::from("models") }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("DFS__").split("__"));
        Ok(figment.extract()?)
    }
}
