//! # 文件输入边界
//!
//! ## 设计思路
//!
//! 统一处理用户选择的本地文件，在“尽可能早”的阶段执行输入校验，
//! 校验失败只产生一条内联提示，不触碰会话状态机：
//!
//! - 存在性 + metadata 体积上限 + 完整读入
//! - 文件签名（magic bytes）必须是 `image/` 类型，`.txt` 等在此被拒绝
//! - 解码一次确认可渲染，同时取到尺寸用于日志
//!
//! 通过校验的文件同时暴露为原始字节 + 媒体类型（交给上色适配层）
//! 与预览 data URL（交给渲染层）。

use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use super::state::SourceImage;

/// 文件输入边界统一错误类型。
///
/// 文案直接展示给用户；该类错误不会进入会话状态机。
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("文件不存在：{0}")]
    NotFound(String),

    #[error("无法读取图片文件：{0}")]
    Io(String),

    #[error("文件过大：{0:.2} MB（限制：{1:.2} MB）")]
    TooLarge(f64, f64),

    #[error("请选择有效的图片文件（{0}）")]
    NotAnImage(String),

    #[error("图片解码失败：{0}")]
    Decode(String),
}

/// 加载并校验用户选择的源图片。
///
/// # 参数
/// * `path` - 前端文件对话框返回的本地路径
/// * `max_file_size` - 允许的最大文件体积（字节）
pub fn load_source_image(path: &str, max_file_size: u64) -> Result<SourceImage, LoadError> {
    log::info!("📁 开始读取源图片 - 路径: {}", path);

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(LoadError::NotFound(path.to_string()));
    }

    let metadata = std::fs::metadata(file_path).map_err(|e| LoadError::Io(e.to_string()))?;
    if metadata.len() > max_file_size {
        return Err(LoadError::TooLarge(
            metadata.len() as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0,
        ));
    }

    let bytes = std::fs::read(file_path).map_err(|e| LoadError::Io(e.to_string()))?;
    let media_type = detect_image_media_type(&bytes)?;

    // 解码一次确认文件可渲染，顺带取尺寸
    let decoded = image::load_from_memory(&bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    log::info!(
        "🖼️ 源图片校验通过 - {}，{}x{}，{} 字节",
        media_type,
        decoded.width(),
        decoded.height(),
        bytes.len()
    );

    let preview_uri = format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(&bytes)
    );

    Ok(SourceImage {
        bytes,
        media_type,
        preview_uri,
    })
}

/// 通过文件签名识别媒体类型，仅放行 `image/` 类型。
fn detect_image_media_type(bytes: &[u8]) -> Result<String, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::NotAnImage("文件内容为空".to_string()));
    }

    let kind = infer::get(bytes)
        .ok_or_else(|| LoadError::NotAnImage("无法识别文件类型".to_string()))?;

    if kind.matcher_type() != infer::MatcherType::Image {
        return Err(LoadError::NotAnImage(format!(
            "文件签名不是图片类型：{}",
            kind.mime_type()
        )));
    }

    Ok(kind.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// 写入临时文件并在测试结束后清理。
    struct TempInput {
        path: PathBuf,
    }

    impl TempInput {
        fn write(name: &str, bytes: &[u8]) -> Self {
            let path = std::env::temp_dir().join(format!(
                "chroma_revive_loader_{}_{}",
                std::process::id(),
                name
            ));
            fs::write(&path, bytes).expect("写入临时文件应成功");
            Self { path }
        }

        fn path_str(&self) -> &str {
            self.path.to_str().expect("临时路径应为合法 UTF-8")
        }
    }

    impl Drop for TempInput {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([100, 100, 100, 255]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        img.write_to(&mut cursor, image::ImageFormat::Png)
            .expect("内存 PNG 编码应成功");
        cursor.into_inner()
    }

    #[test]
    fn loads_valid_png_with_preview_and_media_type() {
        let input = TempInput::write("valid.png", &png_bytes());

        let source = load_source_image(input.path_str(), 10 * 1024 * 1024)
            .expect("合法 PNG 应通过加载");

        assert_eq!(source.media_type, "image/png");
        assert!(source.preview_uri.starts_with("data:image/png;base64,"));
        assert_eq!(source.bytes, png_bytes());
    }

    #[test]
    fn rejects_text_file_as_not_an_image() {
        let input = TempInput::write("note.txt", "hello, this is not an image".as_bytes());

        let result = load_source_image(input.path_str(), 10 * 1024 * 1024);
        assert!(matches!(result, Err(LoadError::NotAnImage(_))));
    }

    #[test]
    fn rejects_empty_file() {
        let input = TempInput::write("empty.bin", &[]);

        let result = load_source_image(input.path_str(), 10 * 1024 * 1024);
        assert!(matches!(result, Err(LoadError::NotAnImage(_))));
    }

    #[test]
    fn rejects_missing_file() {
        let result = load_source_image("/no/such/file.png", 10 * 1024 * 1024);
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn rejects_oversized_file() {
        let input = TempInput::write("big.png", &png_bytes());

        let result = load_source_image(input.path_str(), 16);
        assert!(matches!(result, Err(LoadError::TooLarge(_, _))));
    }

    #[test]
    fn rejects_image_signature_with_corrupt_body() {
        // PNG 签名后接垃圾字节：签名校验通过但解码失败
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0xFF; 32]);
        let input = TempInput::write("corrupt.png", &bytes);

        let result = load_source_image(input.path_str(), 10 * 1024 * 1024);
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }
}
