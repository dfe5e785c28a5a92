//! # 线上协议模型
//!
//! ## 设计思路
//!
//! generateContent 请求/响应的序列化模型与“取第一个内联图像”的提取逻辑。
//! 响应侧只建模实际消费的字段，未知字段由 serde 默认忽略；
//! 结构缺失与“有结构无图像”是两类不同失败，分别映射错误分支。

use serde::{Deserialize, Serialize};

use super::error::ColorizeError;

/// generateContent 请求体。
#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub(crate) contents: Vec<Content>,
}

/// 一组有序的内容部分（请求与响应共用）。
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub(crate) parts: Option<Vec<Part>>,
}

/// 内容部分：内联图像或文本，二者其一。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

/// Base64 编码的内联图像数据。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub(crate) mime_type: String,
    pub(crate) data: String,
}

/// generateContent 响应体。
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub(crate) content: Option<Content>,
}

impl GenerateContentRequest {
    /// 构造“内联图像 + 固定指令”两段式请求。
    pub(crate) fn colorization(image_base64: String, media_type: &str, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: Some(vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: media_type.to_string(),
                            data: image_base64,
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(prompt.to_string()),
                    },
                ]),
            }],
        }
    }
}

/// 从响应中提取第一个内联图像部分。
///
/// - 首个候选缺少 `content.parts` → `InvalidResponseShape`
/// - 结构完整但各部分均无内联图像 → `NoImageInResponse`
pub(crate) fn extract_first_inline_image(
    response: GenerateContentResponse,
) -> Result<InlineData, ColorizeError> {
    let parts = response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                candidates.swap_remove(0).content
            }
        })
        .and_then(|content| content.parts)
        .ok_or(ColorizeError::InvalidResponseShape)?;

    parts
        .into_iter()
        .find_map(|part| part.inline_data)
        .ok_or(ColorizeError::NoImageInResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).expect("测试响应应能解析")
    }

    #[test]
    fn request_serializes_inline_data_in_camel_case() {
        let request =
            GenerateContentRequest::colorization("QUJD".to_string(), "image/jpeg", "colorize");
        let json = serde_json::to_value(&request).expect("请求应能序列化");

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "QUJD");
        assert_eq!(parts[1]["text"], "colorize");
        // 文本部分不应携带空的 inlineData 字段
        assert!(parts[1].get("inlineData").is_none());
    }

    #[test]
    fn extracts_first_inline_image_and_skips_text_parts() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "here is your photo" },
                            { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                            { "inlineData": { "mimeType": "image/png", "data": "c2Vjb25k" } }
                        ]
                    }
                }]
            }"#,
        );

        let inline = extract_first_inline_image(response).expect("应提取到图像");
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "Zmlyc3Q=");
    }

    #[test]
    fn missing_candidates_is_invalid_shape() {
        let response = parse(r#"{}"#);
        assert!(matches!(
            extract_first_inline_image(response),
            Err(ColorizeError::InvalidResponseShape)
        ));
    }

    #[test]
    fn empty_candidates_is_invalid_shape() {
        let response = parse(r#"{ "candidates": [] }"#);
        assert!(matches!(
            extract_first_inline_image(response),
            Err(ColorizeError::InvalidResponseShape)
        ));
    }

    #[test]
    fn candidate_without_parts_is_invalid_shape() {
        let response = parse(r#"{ "candidates": [{ "content": {} }] }"#);
        assert!(matches!(
            extract_first_inline_image(response),
            Err(ColorizeError::InvalidResponseShape)
        ));
    }

    #[test]
    fn text_only_parts_mean_no_image_in_response() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": { "parts": [{ "text": "sorry, no image" }] }
                }]
            }"#,
        );
        assert!(matches!(
            extract_first_inline_image(response),
            Err(ColorizeError::NoImageInResponse)
        ));
    }

    #[test]
    fn unknown_response_fields_are_ignored() {
        let response = parse(
            r#"{
                "modelVersion": "x",
                "candidates": [{
                    "finishReason": "STOP",
                    "content": {
                        "role": "model",
                        "parts": [{ "inlineData": { "mimeType": "image/png", "data": "QQ==" } }]
                    }
                }]
            }"#,
        );
        assert!(extract_first_inline_image(response).is_ok());
    }
}
