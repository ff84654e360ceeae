//! 提供商模块
//!
//! 该模块定义了与视频平台进行交互的核心抽象。

use async_trait::async_trait;

use crate::{error::Result, model::generic::VideoRecord};

pub mod tiktok;

/// 定义了所有视频平台提供商需要实现的通用接口。
#[async_trait]
pub trait Provider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"tiktok"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 根据视频 ID 获取视频的元数据。
    ///
    /// 每次调用只发出一次请求，不做任何重试。
    ///
    /// # 参数
    /// * `video_id` - 特定于该提供商的视频 ID。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含一个通用的 `VideoRecord` 结构。
    ///
    async fn get_video_info(&self, video_id: &str) -> Result<VideoRecord>;
}
