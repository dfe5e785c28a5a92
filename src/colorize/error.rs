//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 远端上色调用的所有失败来源归一化为单一枚举，每个分支携带一条
//! 可直接展示给用户的文案，调用侧按分支匹配、按原文透传。
//! 归一化之前的原始错误在 `client` 内先行记录日志，便于诊断。

/// 上色调用统一错误类型。
///
/// 该类型的 `Display` 文案会原样写入会话错误状态并透传给前端。
#[derive(Debug, thiserror::Error)]
pub enum ColorizeError {
    /// 未配置访问凭证，调用在发起任何网络请求之前即失败。
    #[error("未配置 API 密钥，请检查环境变量配置")]
    MissingCredential,

    /// 远端调用在传输层成功，但响应载荷缺少预期结构。
    #[error("模型响应格式不符合预期")]
    InvalidResponseShape,

    /// 响应结构完整，但不包含任何图像部分。
    #[error("模型未返回图像，请尝试更清晰的照片")]
    NoImageInResponse,

    /// 远端报告鉴权或配额失败。
    #[error("API 密钥无效或配额已用尽")]
    CredentialRejected,

    /// 其余失败：尽量透传底层错误信息，否则使用通用兜底文案。
    #[error("{0}")]
    Unknown(String),
}

/// `Unknown` 分支的通用兜底文案。
const UNKNOWN_FALLBACK: &str = "上色过程中发生未知错误，请稍后重试";

impl ColorizeError {
    /// 稳定错误码，供前端按类别处理。
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "E_MISSING_CREDENTIAL",
            Self::InvalidResponseShape => "E_INVALID_RESPONSE_SHAPE",
            Self::NoImageInResponse => "E_NO_IMAGE_IN_RESPONSE",
            Self::CredentialRejected => "E_CREDENTIAL_REJECTED",
            Self::Unknown(_) => "E_UNKNOWN",
        }
    }

    /// 从底层错误信息构造 `Unknown`，空信息回退到通用文案。
    pub(crate) fn unknown_from(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Unknown(UNKNOWN_FALLBACK.to_string())
        } else {
            Self::Unknown(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let errors = [
            ColorizeError::MissingCredential,
            ColorizeError::InvalidResponseShape,
            ColorizeError::NoImageInResponse,
            ColorizeError::CredentialRejected,
            ColorizeError::Unknown("x".to_string()),
        ];

        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn unknown_from_passes_message_through() {
        let err = ColorizeError::unknown_from("connection reset by peer");
        assert_eq!(err.to_string(), "connection reset by peer");
    }

    #[test]
    fn unknown_from_falls_back_on_empty_message() {
        let err = ColorizeError::unknown_from("   ");
        assert_eq!(err.to_string(), UNKNOWN_FALLBACK);
    }
}
