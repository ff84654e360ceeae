//! 此模块定义了用于反序列化 TikTok 网页端 API 响应的 `struct` 数据结构。
//!
//! 平台在不同时期会把数字字段返回为整数或字符串，
//! 因此计数与时间戳字段都使用宽松的反序列化。

use serde::{Deserialize, Deserializer};

// =================================================================
// 视频详情接口 (`/api/item/detail/`) 的模型
// =================================================================

/// 视频详情 API 的顶层响应结构。
#[derive(Debug, Deserialize)]
pub struct ItemDetailResponse {
    /// 状态码，`0` 表示成功。
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<i64>,
    /// 旧版接口使用的下划线形式状态码。
    #[serde(rename = "status_code", default)]
    pub legacy_status_code: Option<i64>,
    /// 状态描述。
    #[serde(default)]
    pub status_msg: Option<String>,
    /// 视频信息的容器。
    #[serde(rename = "itemInfo", default)]
    pub item_info: Option<ItemInfo>,
}

impl ItemDetailResponse {
    /// 取两种状态码中非零的一个，全部缺失时视为成功。
    pub fn effective_status(&self) -> i64 {
        match (self.status_code, self.legacy_status_code) {
            (Some(code), _) if code != 0 => code,
            (_, Some(code)) => code,
            _ => 0,
        }
    }
}

/// `itemInfo` 部分。
#[derive(Debug, Deserialize)]
pub struct ItemInfo {
    /// 视频本体。
    #[serde(rename = "itemStruct", default)]
    pub item_struct: Option<ItemStruct>,
}

/// 代表一个视频的详细信息。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStruct {
    /// 视频 ID。
    pub id: String,
    /// 视频描述文字。
    #[serde(default)]
    pub desc: String,
    /// 发布时间（Unix 秒）。
    #[serde(default, deserialize_with = "lenient_i64")]
    pub create_time: i64,
    /// 作者信息。
    #[serde(default)]
    pub author: Author,
    /// 视频文件信息。
    #[serde(default)]
    pub video: Video,
    /// 背景音乐信息。
    #[serde(default)]
    pub music: Music,
    /// 互动计数。
    #[serde(default)]
    pub stats: Stats,
}

/// 作者信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Author {
    /// 用户名。
    pub unique_id: String,
    /// 昵称。
    pub nickname: String,
    /// 大尺寸头像。
    pub avatar_larger: Option<String>,
    /// 中等尺寸头像。
    pub avatar_medium: Option<String>,
    /// 缩略头像。
    pub avatar_thumb: Option<String>,
}

/// 视频文件信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    /// 封面图片。
    pub cover: String,
    /// 无水印播放地址。
    pub play_addr: String,
    /// 下载地址。
    pub download_addr: String,
    /// 各个码率的播放地址列表。
    pub bitrate_info: Vec<BitrateInfo>,
}

/// 单个码率的播放信息。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BitrateInfo {
    /// 码率（bps）。
    #[serde(rename = "Bitrate", deserialize_with = "lenient_u64")]
    pub bitrate: u64,
    /// 播放地址。
    #[serde(rename = "PlayAddr")]
    pub play_addr: PlayAddr,
}

/// 码率对应的地址集合。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayAddr {
    /// 候选地址，第一个为首选。
    #[serde(rename = "UrlList")]
    pub url_list: Vec<String>,
}

/// 背景音乐信息。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Music {
    /// 音乐播放地址。
    pub play_url: String,
}

/// 互动计数。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// 播放次数。
    #[serde(deserialize_with = "lenient_u64")]
    pub play_count: u64,
    /// 点赞次数。
    #[serde(deserialize_with = "lenient_u64")]
    pub digg_count: u64,
    /// 评论数。
    #[serde(deserialize_with = "lenient_u64")]
    pub comment_count: u64,
    /// 分享次数。
    #[serde(deserialize_with = "lenient_u64")]
    pub share_count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::<u64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) if s.is_empty() => Ok(0),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::<i64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) if s.is_empty() => Ok(0),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
