//! # 上色调用适配层（colorize）
//!
//! ## 设计思路
//!
//! 该模块把“远端图像生成模型”收敛为一个最小契约：
//! 输入图片字节与媒体类型，输出可直接渲染的图像 URI，或五类归一化失败之一。
//! 会话层对远端的一切细节（端点、协议、鉴权）零感知。
//!
//! - `client`：凭证管理、单次请求、失败归一化（`TransformPort` 契约与实现）
//! - `protocol`：请求/响应序列化模型与内联图像提取
//! - `config`：端点、模型、指令与超时
//! - `error`：统一错误类型 `ColorizeError`
//!
//! ## 调用链
//!
//! ```text
//! session 控制器
//!    ↓ TransformPort::transform(bytes, media_type)
//! client.rs（凭证检查 → 组包 → 单次 POST → 状态码归类）
//!    ├─ protocol.rs（序列化 + 第一个内联图像提取）
//!    └─ error.rs（归一化失败，文案原样透传给用户）
//! ```

mod client;
mod config;
mod error;
mod protocol;

pub use client::{ColorizeClient, PNG_DATA_URI_PREFIX, TransformPort};
pub use config::{COLORIZE_PROMPT, ColorizeConfig, CREDENTIAL_ENV_KEYS};
pub use error::ColorizeError;
