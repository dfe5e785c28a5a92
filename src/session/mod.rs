//! # 会话处理模块（session）
//!
//! ## 设计思路
//!
//! 该模块承载应用唯一有意义的状态机：
//! “选图 → 上色中 → 成功/失败 → 复位”，并把周边职责按阶段拆分，
//! 避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `controller`：状态机编排、代次守卫、旁白定时器生命周期
//! - `state`：阶段和类型、源图片、可序列化快照
//! - `narration`：固定旁白序列与推进规则
//! - `loader`：文件输入边界（读取 + 签名校验 + 预览 data URL）
//! - `download`：结果落盘（时间戳文件名）
//! - `config`：体积上限与旁白间隔
//!
//! ## 调用链
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配 + 揭示位置联动）
//!    ↓
//! controller.rs（状态迁移 + 代次守卫 + 旁白任务）
//!    ├─ loader.rs（输入校验，失败不触碰状态机）
//!    ├─ colorize::TransformPort（远端上色，完成按代次落账）
//!    └─ download.rs（Done 阶段结果保存）
//!    ↓
//! SessionPresenter（每次变更推送快照事件给前端）
//! ```

pub mod commands;

mod config;
mod controller;
mod download;
mod loader;
mod narration;
mod state;

pub use commands::{AppSession, SESSION_STATE_EVENT, TauriSessionPresenter, build_app_session};
pub use config::SessionConfig;
pub use controller::{SessionController, SessionPresenter};
pub use download::write_colorized_file;
pub use loader::{LoadError, load_source_image};
pub use narration::NARRATION_MESSAGES;
pub use state::{SessionPhase, SessionSnapshot, SourceImage};
