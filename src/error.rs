//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各模块中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)` 等不一致模式。
//!
//! 所有 `#[tauri::command]` 函数统一返回 `Result<T, AppError>`，
//! 前端通过 `Serialize` 获得结构化的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `LoadError` / `ColorizeError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 Tauri IPC 要求。

use serde::Serialize;

use crate::colorize::ColorizeError;
use crate::session::LoadError;

/// 应用级统一错误类型
///
/// 所有 Tauri command 均返回此类型，确保前端收到一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 文件输入边界错误（非图片 / 过大 / 不可读）
    #[error("{0}")]
    Load(#[from] LoadError),

    /// 远端上色调用错误（归一化后的失败分类）
    #[error("{0}")]
    Colorize(#[from] ColorizeError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 保存目录不可用
    #[error("存储目录不可用: {0}")]
    Storage(String),

    /// 结果落盘失败
    #[error("保存结果失败: {0}")]
    Download(String),

    /// 会话状态不满足操作前置条件
    #[error("{0}")]
    Session(String),
}

/// Tauri IPC 要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_message_passes_through_unchanged() {
        let err = AppError::from(LoadError::NotAnImage(
            "文件签名不是图片类型：text/plain".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "请选择有效的图片文件（文件签名不是图片类型：text/plain）"
        );
    }

    #[test]
    fn colorize_error_message_passes_through_unchanged() {
        let err = AppError::from(ColorizeError::MissingCredential);
        assert_eq!(err.to_string(), ColorizeError::MissingCredential.to_string());
    }

    #[test]
    fn serializes_to_plain_string() {
        let err = AppError::Session("当前没有可保存的上色结果".to_string());
        let json = serde_json::to_string(&err).expect("错误应可序列化");
        assert_eq!(json, "\"当前没有可保存的上色结果\"");
    }
}
