//! 客户端配置模块
//!
//! 配置在构建时通过环境变量注入（Trunk / cargo 构建时读取），
//! 未定义时使用默认值。

/// 默认值：空字符串表示与前端同源
const DEFAULT_API_BASE_URL: &str = "";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;

/// 客户端运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API 根地址，例如 `https://api.lulusin.id`
    pub api_base_url: String,
    /// 单次请求超时（毫秒）
    pub request_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// 从构建时环境变量加载配置
    ///
    /// - `LULUSIN_API_BASE_URL`
    /// - `LULUSIN_REQUEST_TIMEOUT_MS`
    pub fn from_env() -> Self {
        Self::from_vars(
            option_env!("LULUSIN_API_BASE_URL"),
            option_env!("LULUSIN_REQUEST_TIMEOUT_MS"),
        )
    }

    fn from_vars(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base_url = base_url
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        // 非法或为 0 的超时值回退到默认值
        let request_timeout_ms = timeout_ms
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.request_timeout_ms);

        Self {
            api_base_url,
            request_timeout_ms,
        }
    }
}
