//! 对比滑块几何计算模块
//!
//! 该模块实现前后对比视图的核心几何算法，提供两个纯函数：
//!
//! 1. **指针位置 → 揭示百分比** (`reveal_percentage`)：
//!    将指针横坐标映射为“原图从左侧揭示的百分比”，并收敛到 [0, 100]。
//!
//! 2. **揭示百分比 → 覆盖层补偿宽度** (`overlay_compensation_percent`)：
//!    覆盖层图片必须保持原始尺寸渲染、仅收缩可见裁剪区域，
//!    该函数给出内层图片相对裁剪容器的宽度百分比，保证与底图逐像素对齐。
//!
//! # 设计思路
//!
//! - 算法纯函数化：输入为指针坐标与包围盒，输出唯一数值，便于测试。
//! - 包围盒不可测量（宽度非正、输入非有限数）时返回 `None`，
//!   由调用侧保持旧值不更新，避免产生越界或 NaN 状态。
//! - 先算比例，再做边界收敛，可证明输出必然落在 [0, 100]。

/// 根据指针横坐标计算揭示百分比。
///
/// # 参数
/// * `pointer_x` - 视口坐标系下的指针横坐标
/// * `box_left`  - 部件包围盒左边缘横坐标
/// * `box_width` - 部件包围盒宽度
///
/// # 返回
/// - `Some(p)` — 收敛到 [0, 100] 的揭示百分比
/// - `None` — 包围盒不可测量（宽度非正或任一输入非有限数），不应更新状态
///
/// # 后置条件
/// - 若返回 `Some(p)`：`0.0 <= p && p <= 100.0`
/// - 指针在包围盒左侧之外 → 恰好 `0.0`；右侧之外 → 恰好 `100.0`
pub fn reveal_percentage(pointer_x: f64, box_left: f64, box_width: f64) -> Option<f64> {
    // 异常兜底：包围盒尚未完成布局测量时宽度可能为 0 或 NaN
    if !pointer_x.is_finite() || !box_left.is_finite() || !box_width.is_finite() {
        return None;
    }
    if box_width <= 0.0 {
        return None;
    }

    let ratio = (pointer_x - box_left) / box_width * 100.0;
    Some(ratio.clamp(0.0, 100.0))
}

/// 计算覆盖层内层图片的补偿宽度百分比。
///
/// 裁剪容器宽度为揭示百分比 `p`% 时，内层图片宽度需为 `100 / (p / 100)`%
/// 才能保持与底图相同的渲染尺寸（只裁剪、不缩放）。
///
/// # 返回
/// - `Some(w)` — 内层图片相对裁剪容器的宽度百分比
/// - `None` — `p` 为 0（无可见区域，比例无定义）或越出 [0, 100]
pub fn overlay_compensation_percent(position: f64) -> Option<f64> {
    if !position.is_finite() || !(0.0..=100.0).contains(&position) || position == 0.0 {
        return None;
    }

    Some(100.0 / (position / 100.0))
}
