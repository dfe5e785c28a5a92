//! # 对比部件命令层
//!
//! 命令层仅做 IPC 参数接收与结果返回，几何收敛逻辑在 `calculation`，
//! 状态写入在 `state`。指针每次移动都会同步调用 `update_reveal_position`。

use tauri::State;

use super::calculation::overlay_compensation_percent;
use super::state::RevealState;
use crate::error::AppError;

/// 指针移动时更新揭示位置，返回当前生效的百分比。
#[tauri::command]
pub fn update_reveal_position(
    state: State<'_, RevealState>,
    pointer_x: f64,
    box_left: f64,
    box_width: f64,
) -> Result<f64, AppError> {
    Ok(state.update(pointer_x, box_left, box_width))
}

/// 查询当前揭示位置。
#[tauri::command]
pub fn get_reveal_position(state: State<'_, RevealState>) -> Result<f64, AppError> {
    Ok(state.position())
}

/// 查询覆盖层内层图片的补偿宽度百分比（逐像素对齐用）。
///
/// 揭示位置为 0 时无可见区域，返回 `None`，前端直接隐藏覆盖层。
#[tauri::command]
pub fn get_overlay_compensation(state: State<'_, RevealState>) -> Result<Option<f64>, AppError> {
    Ok(overlay_compensation_percent(state.position()))
}
