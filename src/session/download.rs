//! # 结果落盘模块
//!
//! ## 设计思路
//!
//! 把 `Done` 阶段的结果 data URL 解码为 PNG 字节并写入磁盘，
//! 文件名带毫秒级时间戳避免覆盖；默认写入系统下载目录，
//! 也接受显式目标目录（不存在时自动创建）。全程无网络往返。

use std::fs;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use tauri::Manager;

use crate::colorize::PNG_DATA_URI_PREFIX;
use crate::error::AppError;

/// 将结果 data URL 写入指定目录，返回完整文件路径。
pub fn write_colorized_file(dir: &Path, result_uri: &str) -> Result<PathBuf, AppError> {
    let payload = result_uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| AppError::Download("结果数据不是 PNG data URL".to_string()))?;

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AppError::Download(format!("结果数据解码失败：{}", e)))?;

    let file_name = format!("colorized-photo-{}.png", Utc::now().timestamp_millis());
    let file_path = dir.join(&file_name);

    fs::write(&file_path, &bytes)?;

    log::info!(
        "💾 已保存上色结果 - {}（{} 字节）",
        file_path.display(),
        bytes.len()
    );

    Ok(file_path)
}

/// 解析保存目标目录：优先显式目录，回退到系统下载目录。
pub fn resolve_target_dir(
    app: &tauri::AppHandle,
    custom_dir: Option<String>,
) -> Result<PathBuf, AppError> {
    if let Some(dir) = custom_dir {
        if !dir.is_empty() {
            let path = PathBuf::from(&dir);
            if !path.exists() {
                fs::create_dir_all(&path).map_err(|e| {
                    AppError::Storage(format!("创建目标目录 '{}' 失败: {}", dir, e))
                })?;
            }
            return Ok(path);
        }
    }

    app.path()
        .download_dir()
        .map_err(|e| AppError::Storage(format!("获取下载目录失败: {}", e)))
}
