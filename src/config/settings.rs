// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 应用程序配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 搜索提供方配置
    pub provider: ProviderSettings,
    /// 会话配置
    pub session: SessionSettings,
    /// 结果缓存配置
    pub cache: CacheSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// DuckDuckGo 端点与 HTTP 客户端设置
///
/// 端点可覆盖，测试中指向本地模拟服务器
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    /// 主站（vqd 令牌、news.js、i.js、v.js、ac、translation.js）
    pub base_url: String,
    /// 无脚本 HTML 搜索页
    pub html_url: String,
    /// 文本搜索 d.js 接口
    pub links_url: String,
    /// 即时答案接口
    pub api_url: String,
    pub user_agent: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 会话配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 会话 Cookie 名称
    pub cookie_name: String,
    /// 空闲会话过期时间（秒）
    pub idle_timeout_secs: u64,
}

/// 结果缓存配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 缓存的 (类别, 查询) 条目上限
    pub capacity: usize,
    /// 条目存活时间（秒）
    pub ttl_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://duckduckgo.com".to_string(),
            html_url: "https://html.duckduckgo.com".to_string(),
            links_url: "https://links.duckduckgo.com".to_string(),
            api_url: "https://api.duckduckgo.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "ddgs_session".to_string(),
            idle_timeout_secs: 3600,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 256,
            ttl_secs: 600,
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// 环境专属配置文件；未设置或与默认文件相同时不再叠加
fn environment_config_file(env: Option<&str>) -> Option<String> {
    let env = env.map(str::trim).filter(|env| !env.is_empty())?;
    let file = format!("config/{}", env);
    (file != DEFAULT_CONFIG_FILE).then_some(file)
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// 以 `DDGS_WEB__` 为前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").ok();
        let mut builder = Self::builder_with_defaults()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        if let Some(file) = environment_config_file(env.as_deref()) {
            builder = builder.add_source(File::with_name(&file).required(false));
        }
        builder
            .add_source(Environment::with_prefix("DDGS_WEB").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            // Default provider endpoints
            .set_default("provider.base_url", defaults.provider.base_url)?
            .set_default("provider.html_url", defaults.provider.html_url)?
            .set_default("provider.links_url", defaults.provider.links_url)?
            .set_default("provider.api_url", defaults.provider.api_url)?
            .set_default("provider.user_agent", defaults.provider.user_agent)?
            .set_default("provider.timeout_secs", defaults.provider.timeout_secs as i64)?
            // Default session settings
            .set_default("session.cookie_name", defaults.session.cookie_name)?
            .set_default(
                "session.idle_timeout_secs",
                defaults.session.idle_timeout_secs as i64,
            )?
            // Default cache settings
            .set_default("cache.capacity", defaults.cache.capacity as i64)?
            .set_default("cache.ttl_secs", defaults.cache.ttl_secs as i64)
    }
}
