//! # 处理旁白序列
//!
//! 上色进行期间按固定间隔推进的一组状态文案，纯装饰性质：
//! 推进节奏与真实进度无关，真正结束 `Transforming` 的是远端调用的完成。
//! 序列推进到最后一条后停住不再变化。

/// 旁白文案，按顺序逐条展示。
pub const NARRATION_MESSAGES: [&str; 5] = [
    "正在分析图像结构…",
    "正在识别历史场景特征…",
    "正在应用深度学习色彩…",
    "正在修复肤色与纹理细节…",
    "正在补充自然光影效果…",
];

/// 取指定序号的文案，越界时停在最后一条。
pub(crate) fn message(step: usize) -> &'static str {
    NARRATION_MESSAGES[step.min(NARRATION_MESSAGES.len() - 1)]
}

/// 推进到下一条文案的序号；已到最后一条时返回 `None`（序列耗尽）。
pub(crate) fn advance(step: usize) -> Option<usize> {
    let next = step + 1;
    if next < NARRATION_MESSAGES.len() {
        Some(next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_all_messages_then_stops() {
        let mut step = 0;
        let mut seen = vec![message(step)];

        while let Some(next) = advance(step) {
            step = next;
            seen.push(message(step));
        }

        assert_eq!(seen, NARRATION_MESSAGES);
        assert_eq!(advance(step), None);
    }

    #[test]
    fn message_saturates_at_last_entry() {
        let last = NARRATION_MESSAGES[NARRATION_MESSAGES.len() - 1];
        assert_eq!(message(NARRATION_MESSAGES.len()), last);
        assert_eq!(message(usize::MAX), last);
    }
}
