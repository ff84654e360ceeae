//! 定义了对外输出的 `FetchResult` 结构。
//!
//! 输出格式固定为：
//! - 成功：`{"success": true, "data": {...}}`
//! - 失败：`{"success": false, "message": "..."}`
//!
//! 分隔符使用 `", "` 与 `": "`，与调用方已有的解析习惯保持一致。

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::{
    error::Result,
    model::generic::{VideoAuthor, VideoRecord},
};

/// 未提供视频链接时输出的消息。
pub const MISSING_ARGUMENT_MESSAGE: &str = "缺少 URL 参数。";

const UNKNOWN_ERROR_MESSAGE: &str = "未知错误。";

/// 成功时 `data` 字段的内容。
///
/// 字段与 `VideoRecord` 一一对应，只做重命名。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoData {
    /// 视频 ID。
    pub id: String,
    /// 视频作者。
    pub author: VideoAuthor,
    /// 视频描述。
    pub title: String,
    /// 封面 URL。
    pub cover: String,
    /// 无水印播放地址。
    pub play: String,
    /// 高清无水印播放地址。
    pub hdplay: String,
    /// 背景音乐地址。
    pub music: String,
    /// 播放次数。
    pub play_count: u64,
    /// 点赞次数。
    pub digg_count: u64,
    /// 评论数。
    pub comment_count: u64,
    /// 分享次数。
    pub share_count: u64,
    /// 发布时间（Unix 秒）。
    pub create_time: i64,
}

impl From<VideoRecord> for VideoData {
    fn from(video: VideoRecord) -> Self {
        VideoData {
            id: video.id,
            author: video.author,
            title: video.description,
            cover: video.cover_url,
            play: video.download_url,
            hdplay: video.hd_download_url,
            music: video.music_url,
            play_count: video.stats.play_count,
            digg_count: video.stats.digg_count,
            comment_count: video.stats.comment_count,
            share_count: video.stats.share_count,
            create_time: video.create_time,
        }
    }
}

/// 一次获取操作的最终结果。
///
/// `data` 与 `message` 有且只有一个存在，由 `success` 决定，
/// 因此字段保持私有，只能通过 [`FetchResult::success`] 或 [`FetchResult::failure`] 构造。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<VideoData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl FetchResult {
    /// 构造一个成功结果。
    pub fn success(data: VideoData) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// 构造一个失败结果。空白消息会被替换为通用的“未知错误”。
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }

    /// 未提供视频链接时的结果。
    pub fn missing_argument() -> Self {
        Self::failure(MISSING_ARGUMENT_MESSAGE)
    }

    /// 是否成功。
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// 成功时的视频数据。
    pub fn data(&self) -> Option<&VideoData> {
        self.data.as_ref()
    }

    /// 失败时的错误消息。
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 序列化为单行 JSON。
    pub fn to_json(&self) -> Result<String> {
        to_spaced_json(self)
    }
}

/// 在逗号和冒号之后各加一个空格的单行格式。
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn to_spaced_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

impl From<Result<VideoData>> for FetchResult {
    fn from(result: Result<VideoData>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e.to_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TikTokHelperError, model::generic::VideoStats};

    fn sample_record() -> VideoRecord {
        VideoRecord {
            id: "7123456789012345678".to_string(),
            author: VideoAuthor {
                unique_id: "someone".to_string(),
                nickname: "Some One".to_string(),
                avatar: "https://cdn.example.com/a.jpeg".to_string(),
            },
            description: "hello #fyp".to_string(),
            cover_url: "https://cdn.example.com/c.jpeg".to_string(),
            download_url: "https://cdn.example.com/play.mp4".to_string(),
            hd_download_url: "https://cdn.example.com/hd.mp4".to_string(),
            music_url: "https://cdn.example.com/m.mp3".to_string(),
            stats: VideoStats {
                play_count: 1000,
                digg_count: 200,
                comment_count: 30,
                share_count: 4,
            },
            create_time: 1_700_000_000,
        }
    }

    #[test]
    fn test_success_serialization() {
        let result = FetchResult::success(sample_record().into());
        insta::assert_snapshot!(
            result.to_json().unwrap(),
            @r#"{"success": true, "data": {"id": "7123456789012345678", "author": {"unique_id": "someone", "nickname": "Some One", "avatar": "https://cdn.example.com/a.jpeg"}, "title": "hello #fyp", "cover": "https://cdn.example.com/c.jpeg", "play": "https://cdn.example.com/play.mp4", "hdplay": "https://cdn.example.com/hd.mp4", "music": "https://cdn.example.com/m.mp3", "play_count": 1000, "digg_count": 200, "comment_count": 30, "share_count": 4, "create_time": 1700000000}}"#
        );
    }

    #[test]
    fn test_missing_argument_serialization() {
        insta::assert_snapshot!(
            FetchResult::missing_argument().to_json().unwrap(),
            @r#"{"success": false, "message": "缺少 URL 参数。"}"#
        );
    }

    #[test]
    fn test_spaced_separators() {
        let value = serde_json::json!({ "a": [1, 2, []], "b": {}, "c": { "d": null } });
        assert_eq!(
            to_spaced_json(&value).unwrap(),
            r#"{"a": [1, 2, []], "b": {}, "c": {"d": null}}"#
        );
    }

    #[test]
    fn test_failure_has_no_data() {
        let result = FetchResult::failure("boom");
        assert!(!result.is_success());
        assert!(result.data().is_none());
        assert_eq!(result.message(), Some("boom"));

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_blank_failure_message_is_replaced() {
        let result = FetchResult::failure("  ");
        assert_eq!(result.message(), Some(UNKNOWN_ERROR_MESSAGE));
    }

    #[test]
    fn test_from_result() {
        let ok: FetchResult = Ok(VideoData::from(sample_record())).into();
        assert!(ok.is_success());
        assert_eq!(ok.data().unwrap().title, "hello #fyp");
        assert!(ok.message().is_none());

        let err: FetchResult = Err(TikTokHelperError::Auth("会话已过期".into())).into();
        assert_eq!(err.message(), Some("[auth] 认证失败: 会话已过期"));
    }
}
