//! # 对比揭示部件（reveal）
//!
//! ## 设计思路
//!
//! 前后对比视图由前端渲染：底图（上色结果）完整显示，覆盖层（原图）
//! 从左侧裁剪显示一定百分比。本模块承载其全部非展示逻辑：
//!
//! - `calculation`：纯函数几何（指针 → 收敛百分比、覆盖层补偿宽度）
//! - `state`：唯一可变状态（当前揭示百分比）
//! - `commands`：IPC 薄封装
//!
//! ## 实现思路
//!
//! 指针每次移动事件都同步走一遍“收敛 → 存储 → 返回”，不做节流；
//! 包围盒不可测量时静默保持旧值。新图片对出现时由会话命令层调用
//! `reset_for_new_pair` 复位到 50。

pub mod commands;

mod calculation;
mod state;

pub use calculation::{overlay_compensation_percent, reveal_percentage};
pub use state::{INITIAL_REVEAL_POSITION, RevealState};
