//! 定义了与具体提供商无关的视频数据模型。
//!
//! 所有 Provider 在获取到各自平台的数据后，都需要转换成 `VideoRecord`。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 代表视频作者的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAuthor {
    /// 作者在平台上的唯一用户名（即 `@` 后面的部分）。
    pub unique_id: String,
    /// 作者昵称。
    pub nickname: String,
    /// 作者头像 URL。
    pub avatar: String,
}

/// 视频的互动计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    /// 播放次数。
    pub play_count: u64,
    /// 点赞次数。
    pub digg_count: u64,
    /// 评论数。
    pub comment_count: u64,
    /// 分享次数。
    pub share_count: u64,
}

/// 代表一个视频的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// 视频在平台上的 ID。
    pub id: String,
    /// 视频作者。
    pub author: VideoAuthor,
    /// 视频描述文字。
    pub description: String,
    /// 封面图片 URL。
    pub cover_url: String,
    /// 无水印播放地址。
    pub download_url: String,
    /// 高清无水印播放地址。
    pub hd_download_url: String,
    /// 背景音乐地址。
    pub music_url: String,
    /// 互动计数。
    pub stats: VideoStats,
    /// 发布时间（Unix 秒）。
    pub create_time: i64,
}

impl VideoRecord {
    /// 将发布时间转换为 UTC 时间，时间戳超出范围时返回 `None`。
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.create_time, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_at() {
        let record = VideoRecord {
            create_time: 1_700_000_000,
            ..Default::default()
        };
        assert_eq!(
            record.created_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }
}
