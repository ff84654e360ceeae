//! 链接处理相关的工具函数。

use crate::error::{Result, TikTokHelperError};

/// 从视频链接中提取视频 ID。
///
/// 取最后一个 `/` 之后的路径段，并去掉 `?` 之后的查询字符串。
///
/// # 示例
/// ```
/// use tiktok_helper_rs::utils::extract_video_id;
///
/// let id = extract_video_id("https://example.com/video/7123456789012345678?lang=en").unwrap();
/// assert_eq!(id, "7123456789012345678");
/// ```
///
/// # 错误
/// 提取结果为空（例如链接以 `/` 结尾）时返回 `TikTokHelperError::InvalidUrl`。
pub fn extract_video_id(url: &str) -> Result<&str> {
    let last_segment = url.rsplit('/').next().unwrap_or_default();
    let id = last_segment.split('?').next().unwrap_or_default();

    if id.is_empty() {
        return Err(TikTokHelperError::InvalidUrl(url.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        assert_eq!(
            extract_video_id("https://www.tiktok.com/@user/video/7123456789012345678").unwrap(),
            "7123456789012345678"
        );
    }

    #[test]
    fn test_query_string_is_stripped() {
        assert_eq!(
            extract_video_id("https://example.com/video/7123456789012345678?lang=en").unwrap(),
            "7123456789012345678"
        );
        assert_eq!(
            extract_video_id("https://www.tiktok.com/@u/video/42?is_from_webapp=1&sender_device=pc")
                .unwrap(),
            "42"
        );
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(extract_video_id("7123456789012345678").unwrap(), "7123456789012345678");
    }

    #[test]
    fn test_segment_is_not_trimmed() {
        assert_eq!(
            extract_video_id("https://www.tiktok.com/@user/video/ 42 ?lang=en").unwrap(),
            " 42 "
        );
        assert_eq!(extract_video_id("https://www.tiktok.com/@user/video/ ").unwrap(), " ");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        for url in ["", "https://www.tiktok.com/@user/video/", "https://x.com/?a=b"] {
            let err = extract_video_id(url).unwrap_err();
            assert!(
                matches!(err, TikTokHelperError::InvalidUrl(_)),
                "应拒绝链接 '{url}'"
            );
        }
    }
}
