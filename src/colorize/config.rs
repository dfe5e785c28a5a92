//! # 上色服务配置模块
//!
//! ## 设计思路
//!
//! 将远端调用的全部可调参数集中到 `ColorizeConfig`：端点、模型、
//! 指令文本、超时与凭证环境变量名。`Default` 提供生产可用配置，
//! 测试可注入替代值（例如指向本地假服务）。

/// 发送给模型的固定上色指令。
///
/// 输出语义依赖该文案（真实、保留细节、肤色/植被/天空自然），不要随意改动。
pub const COLORIZE_PROMPT: &str = "Please colorize this black and white photograph. \
Restore the natural colors as accurately as possible, making it look vibrant yet realistic. \
Preserve all the textures and details from the original image. \
Ensure skin tones, foliage, and sky look authentic.";

/// 凭证环境变量名，按顺序取第一个非空值。
pub const CREDENTIAL_ENV_KEYS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// 远端上色调用配置。
#[derive(Debug, Clone)]
pub struct ColorizeConfig {
    /// API 基础地址（不含模型路径）。
    pub endpoint: String,
    /// 图像生成模型标识。
    pub model: String,
    /// 上色指令文本。
    pub prompt: String,
    /// 建立连接（TCP/TLS）超时时间（秒）。
    pub connect_timeout: u64,
    /// 单次请求整体超时时间（秒）。模型生成图像耗时较长，留足余量。
    pub request_timeout: u64,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            prompt: COLORIZE_PROMPT.to_string(),
            connect_timeout: 8,
            request_timeout: 120,
        }
    }
}

impl ColorizeConfig {
    /// 拼接 generateContent 请求地址。
    pub(crate) fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}
