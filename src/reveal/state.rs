//! # 揭示位置状态
//!
//! ## 设计思路
//!
//! 对比部件的全部可变状态只有一个数值：揭示百分比。
//! 用 `RevealState` 作为 Tauri 注入状态持有它，写入只发生在两处：
//! 指针移动（经 `calculation` 收敛后存储）与新图片对出现时的复位。

use std::sync::{Mutex, MutexGuard};

use super::calculation::reveal_percentage;

/// 新图片对出现时的初始揭示位置（左右各半）。
pub const INITIAL_REVEAL_POSITION: f64 = 50.0;

/// 对比部件状态。
///
/// 作为 Tauri `State` 注入到命令层，持有当前揭示百分比。
pub struct RevealState {
    position: Mutex<f64>,
}

impl RevealState {
    pub fn new() -> Self {
        Self {
            position: Mutex::new(INITIAL_REVEAL_POSITION),
        }
    }

    fn lock_position(&self) -> MutexGuard<'_, f64> {
        match self.position.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("揭示位置锁中毒，继续使用恢复数据");
                poisoned.into_inner()
            }
        }
    }

    /// 当前揭示百分比。
    pub fn position(&self) -> f64 {
        *self.lock_position()
    }

    /// 根据指针位置同步更新揭示百分比。
    ///
    /// 包围盒不可测量时不更新，返回值始终为当前存储值。
    pub fn update(&self, pointer_x: f64, box_left: f64, box_width: f64) -> f64 {
        let mut position = self.lock_position();
        if let Some(next) = reveal_percentage(pointer_x, box_left, box_width) {
            *position = next;
        } else {
            log::debug!(
                "🖱️ 包围盒不可测量（left={}, width={}），保持揭示位置 {}",
                box_left,
                box_width,
                *position
            );
        }
        *position
    }

    /// 展示新的图片对时复位到初始位置。
    pub fn reset_for_new_pair(&self) {
        *self.lock_position() = INITIAL_REVEAL_POSITION;
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_position() {
        let state = RevealState::new();
        assert_eq!(state.position(), INITIAL_REVEAL_POSITION);
    }

    #[test]
    fn update_stores_clamped_value() {
        let state = RevealState::new();

        assert_eq!(state.update(250.0, 0.0, 1000.0), 25.0);
        assert_eq!(state.position(), 25.0);

        assert_eq!(state.update(-80.0, 0.0, 1000.0), 0.0);
        assert_eq!(state.update(2000.0, 0.0, 1000.0), 100.0);
    }

    #[test]
    fn unmeasurable_box_keeps_previous_value() {
        let state = RevealState::new();
        state.update(300.0, 0.0, 1000.0);

        assert_eq!(state.update(700.0, 0.0, 0.0), 30.0);
        assert_eq!(state.position(), 30.0);
    }

    #[test]
    fn reset_restores_initial_position() {
        let state = RevealState::new();
        state.update(900.0, 0.0, 1000.0);

        state.reset_for_new_pair();
        assert_eq!(state.position(), INITIAL_REVEAL_POSITION);
    }
}
