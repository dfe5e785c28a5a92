//! # 上色调用客户端
//!
//! ## 设计思路
//!
//! `ColorizeClient` 把远端图像生成模型封装为一次性调用：
//! 凭证在构造时从环境读取，缺失时在发起任何网络请求之前直接失败；
//! 每次调用恰好发出一次请求，不重试、不缓存；所有失败先记录原始
//! 错误日志，再归一化为 [`ColorizeError`] 返回。
//!
//! ## 实现思路
//!
//! - HTTP 客户端在构造时按配置超时构建一次，后续复用。
//! - 鉴权/配额类状态码（401/403/429）归并为 `CredentialRejected`。
//! - 成功路径校验返回的 Base64 可解码后，包装为 `data:image/png;base64,…`，
//!   保证结果可直接交给渲染层使用。

use std::env;
use std::future::Future;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::StatusCode;

use super::config::{ColorizeConfig, CREDENTIAL_ENV_KEYS};
use super::error::ColorizeError;
use super::protocol::{GenerateContentRequest, GenerateContentResponse, extract_first_inline_image};

/// 上色结果统一输出为 PNG data URL（模型输出格式视为固定）。
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// 上色转换端口。
///
/// 会话控制器只依赖该端口，测试注入假实现即可驱动完整状态机。
/// 约定：入参为非空图片字节与 `image/` 开头的媒体类型（上游已校验），
/// 成功时返回可直接渲染的图像 URI。
pub trait TransformPort: Send + Sync + 'static {
    fn transform(
        &self,
        image_bytes: &[u8],
        media_type: &str,
    ) -> impl Future<Output = Result<String, ColorizeError>> + Send;
}

/// 远端上色客户端。
pub struct ColorizeClient {
    config: ColorizeConfig,
    credential: Option<String>,
    http: reqwest::Client,
}

impl ColorizeClient {
    /// 从环境变量读取凭证并构造客户端。
    ///
    /// 凭证缺失不是构造错误：应用可以正常启动，
    /// 首次发起上色时才以 `MissingCredential` 失败。
    pub fn from_env(config: ColorizeConfig) -> Result<Self, ColorizeError> {
        let credential = CREDENTIAL_ENV_KEYS
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.trim().is_empty());

        if credential.is_none() {
            log::warn!(
                "🔑 未在环境变量（{}）中找到 API 凭证，上色功能将不可用",
                CREDENTIAL_ENV_KEYS.join(" / ")
            );
        }

        Self::with_credential(config, credential)
    }

    /// 使用显式凭证构造客户端，主要用于测试。
    pub fn with_credential(
        config: ColorizeConfig,
        credential: Option<String>,
    ) -> Result<Self, ColorizeError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| {
                log::error!("🎨 初始化 HTTP 客户端失败: {}", e);
                ColorizeError::unknown_from(format!("初始化 HTTP 客户端失败：{}", e))
            })?;

        Ok(Self {
            config,
            credential,
            http,
        })
    }

    async fn colorize(&self, image_bytes: &[u8], media_type: &str) -> Result<String, ColorizeError> {
        let Some(credential) = self.credential.as_deref() else {
            log::error!("🎨 上色调用失败：未配置 API 凭证");
            return Err(ColorizeError::MissingCredential);
        };

        let request = GenerateContentRequest::colorization(
            general_purpose::STANDARD.encode(image_bytes),
            media_type,
            &self.config.prompt,
        );

        log::info!(
            "🎨 调用上色模型 {} - 输入 {}（{} 字节）",
            self.config.model,
            media_type,
            image_bytes.len()
        );

        let response = self
            .http
            .post(self.config.generate_content_url())
            .header("x-goog-api-key", credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("🎨 上色请求发送失败: {}", e);
                ColorizeError::unknown_from(format!("网络请求失败：{}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("🎨 上色调用返回异常状态 {} - 响应体: {}", status, body);
            return Err(Self::classify_http_failure(status));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            log::error!("🎨 上色响应解析失败: {}", e);
            ColorizeError::InvalidResponseShape
        })?;

        let inline = extract_first_inline_image(payload).inspect_err(|e| {
            log::error!("🎨 上色响应缺少图像内容: {}", e);
        })?;

        // 校验载荷可解码，保证返回的 URI 一定能被渲染层直接使用
        let decoded = general_purpose::STANDARD.decode(&inline.data).map_err(|e| {
            log::error!("🎨 上色响应中的图像数据不是合法 Base64: {}", e);
            ColorizeError::InvalidResponseShape
        })?;

        log::info!(
            "✅ 上色完成 - 输出 {}（{} 字节）",
            inline.mime_type,
            decoded.len()
        );

        Ok(format!("{}{}", PNG_DATA_URI_PREFIX, inline.data))
    }

    /// 按状态码归类 HTTP 层失败。
    ///
    /// 鉴权失败与配额耗尽对用户是同一类问题（凭证不可用），合并为一条文案。
    fn classify_http_failure(status: StatusCode) -> ColorizeError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                ColorizeError::CredentialRejected
            }
            _ => ColorizeError::unknown_from(format!("模型调用失败（HTTP {}）", status.as_u16())),
        }
    }

    /// 当前是否已配置凭证。
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// 使用默认生产配置与环境凭证。
    pub fn default_from_env() -> Result<Self, ColorizeError> {
        Self::from_env(ColorizeConfig::default())
    }
}

impl TransformPort for ColorizeClient {
    async fn transform(
        &self,
        image_bytes: &[u8],
        media_type: &str,
    ) -> Result<String, ColorizeError> {
        self.colorize(image_bytes, media_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_without_credential() -> ColorizeClient {
        ColorizeClient::with_credential(ColorizeConfig::default(), None)
            .expect("客户端构造应成功")
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        // endpoint 指向不可达地址：若实现误发请求，错误将不是 MissingCredential
        let config = ColorizeConfig {
            endpoint: "http://127.0.0.1:1/unreachable".to_string(),
            ..ColorizeConfig::default()
        };
        let client =
            ColorizeClient::with_credential(config, None).expect("客户端构造应成功");

        let result = client.transform(&[1, 2, 3], "image/jpeg").await;
        assert!(matches!(result, Err(ColorizeError::MissingCredential)));
    }

    #[test]
    fn credential_presence_is_observable() {
        assert!(!client_without_credential().has_credential());

        let with_key = ColorizeClient::with_credential(
            ColorizeConfig::default(),
            Some("test-key".to_string()),
        )
        .expect("客户端构造应成功");
        assert!(with_key.has_credential());
    }

    #[test]
    fn auth_and_quota_statuses_map_to_credential_rejected() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert!(matches!(
                ColorizeClient::classify_http_failure(status),
                ColorizeError::CredentialRejected
            ));
        }
    }

    #[test]
    fn other_statuses_map_to_unknown_with_status_in_message() {
        let err = ColorizeClient::classify_http_failure(StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            ColorizeError::Unknown(message) => assert!(message.contains("500")),
            other => panic!("应归类为 Unknown，实际: {:?}", other),
        }
    }
}
