//! # 老照片上色工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  前端 (webview，纯展示层)                 │
//! │                                                          │
//! │   上传区 ── 预览/对比视图 ── 进度浮层 ── 下载按钮          │
//! │       │  (按快照事件渲染，不维护状态机)                   │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError> + 快照事件)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ session ──── 状态机 + 代次守卫 + 旁白定时器            │
//! │  │   ├─ loader      文件输入边界（签名校验）               │
//! │  │   └─ download    结果落盘（时间戳文件名）               │
//! │  │                                                       │
//! │  ├─ colorize ─── 远端上色调用（单次请求·失败归一化）        │
//! │  └─ reveal ───── 对比揭示部件（纯函数几何 + 单一数值）      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有 Tauri command 的返回类型 |
//! | [`session`] | 选图→上色→结果的状态机、旁白序列、输入边界与结果保存 |
//! | [`colorize`] | 远端图像生成模型调用、凭证管理、失败归一化 |
//! | [`reveal`] | 前后对比的揭示百分比：指针收敛、覆盖层对齐补偿 |

pub mod colorize;
pub mod error;
pub mod reveal;
pub mod session;
