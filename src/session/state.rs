//! # 会话状态模型
//!
//! ## 设计思路
//!
//! 用带载荷的和类型 `SessionPhase` 显式表达全部阶段，
//! 让“结果存在但仍在处理中”这类非法组合在类型层面不可表达：
//! 结果 URI 只存在于 `Done`，错误详情只存在于 `Error`。
//! 源图片与阶段分开存放，不变量为“非 `NoImage` 阶段必有源图片”。

use std::sync::Arc;

use super::narration;

/// 用户选定的源图片。
///
/// 每次成功选择文件创建一次，之后只读共享；重新选择时整体替换，复位时丢弃。
#[derive(Debug)]
pub struct SourceImage {
    /// 原始文件字节，交给上色适配层使用。
    pub bytes: Vec<u8>,
    /// 按文件签名识别出的媒体类型（`image/` 开头）。
    pub media_type: String,
    /// 可直接渲染的预览 data URL。
    pub preview_uri: String,
}

/// 会话阶段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// 尚未选择图片。
    NoImage,
    /// 图片已加载，可发起上色。
    Ready,
    /// 上色进行中，`narration_step` 为当前旁白序号。
    Transforming { narration_step: usize },
    /// 上色成功，携带可渲染的结果 URI。
    Done { result_uri: String },
    /// 上色失败，携带面向用户的文案与稳定错误码。
    Error { detail: String, code: &'static str },
}

impl SessionPhase {
    /// 阶段标签，作为快照与事件载荷中的判别字段。
    pub fn tag(&self) -> &'static str {
        match self {
            Self::NoImage => "no_image",
            Self::Ready => "ready",
            Self::Transforming { .. } => "transforming",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }
}

/// 会话全量状态（锁内数据）。
#[derive(Debug)]
pub(crate) struct Session {
    /// 单调递增的代次计数：每次被接受的用户动作（选图 / 启动 / 复位）+1。
    /// 异步完成回调携带过期代次时直接丢弃。
    pub(crate) generation: u64,
    pub(crate) source: Option<Arc<SourceImage>>,
    pub(crate) phase: SessionPhase,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            generation: 0,
            source: None,
            phase: SessionPhase::NoImage,
        }
    }
}

impl Session {
    /// 生成发送给前端的可序列化投影。
    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        let (result_uri, narration, error_detail, error_code) = match &self.phase {
            SessionPhase::Transforming { narration_step } => {
                (None, Some(narration::message(*narration_step)), None, None)
            }
            SessionPhase::Done { result_uri } => (Some(result_uri.clone()), None, None, None),
            SessionPhase::Error { detail, code } => {
                (None, None, Some(detail.clone()), Some(*code))
            }
            SessionPhase::NoImage | SessionPhase::Ready => (None, None, None, None),
        };

        SessionSnapshot {
            phase: self.phase.tag(),
            generation: self.generation,
            preview_uri: self.source.as_ref().map(|s| s.preview_uri.clone()),
            result_uri,
            narration,
            error_detail,
            error_code,
        }
    }
}

/// 会话状态快照。
///
/// 每次状态变更都会通过事件推送一份，命令返回值也使用同一结构，
/// 前端据此渲染而无需自行维护状态机。
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionSnapshot {
    pub phase: &'static str,
    pub generation: u64,
    pub preview_uri: Option<String>,
    pub result_uri: Option<String>,
    pub narration: Option<&'static str>,
    pub error_detail: Option<String>,
    pub error_code: Option<&'static str>,
}
