use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 参考数据文件 (mutuelles.json)
    pub path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            data: DataConfig {
                path: "data/mutuelles.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 默认值 + 环境变量 (SEMELLES_SERVER__PORT, SEMELLES_DATA__PATH ...)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("data.path", defaults.data.path)?
            .add_source(
                Environment::with_prefix("SEMELLES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // 兼容 PORT
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}
