//! # 会话配置模块
//!
//! 集中会话层的可调策略：输入文件体积上限与旁白推进间隔。
//! `Default` 为生产配置；测试注入更短的间隔以加速断言。

/// 会话处理配置。
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 允许选择的源图片最大体积（字节）。
    pub max_source_file_size: u64,
    /// 旁白文案推进间隔（毫秒）。
    pub narration_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_source_file_size: 10 * 1024 * 1024,
            narration_interval_ms: 2_000,
        }
    }
}
