#![warn(missing_docs)]

//! # TikTok Helper RS
//!
//! 一个小巧的 Rust 库，根据 TikTok 视频链接获取视频元数据，并输出统一格式的 JSON。
//!
//! ## 主要功能
//!
//! - **ID 提取**: 从视频链接中提取视频 ID。
//! - **元数据获取**: 通过 TikTok 网页端 API 获取作者、封面、无水印播放地址、音乐和互动计数。
//! - **统一输出**: 无论成功与否，都得到一个 `FetchResult`，可直接序列化为 JSON。
//!
//! ## 获取视频信息
//!
//! ```rust,no_run
//! use tiktok_helper_rs::{MetadataFetcher, config::SessionConfig};
//!
//! async {
//!     let config = SessionConfig::load().unwrap();
//!     let fetcher = MetadataFetcher::from_config(config).unwrap();
//!
//!     let result = fetcher
//!         .fetch("https://www.tiktok.com/@scout2015/video/6718335390845095173")
//!         .await;
//!     println!("{}", result.to_json().unwrap());
//! };
//! ```
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod utils;

pub use crate::{
    error::{ErrorKind, Result, TikTokHelperError},
    model::result::{FetchResult, VideoData},
};

use crate::{
    config::SessionConfig,
    providers::{Provider, tiktok::TikTokClient},
    utils::extract_video_id,
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层元数据获取器，封装了一个视频平台提供商。
///
/// 这是与本库交互的主要入口点。每次调用 [`MetadataFetcher::fetch`] 恰好发出一次请求，
/// 不做重试，也不缓存结果。
pub struct MetadataFetcher {
    provider: Box<dyn Provider>,
}

impl MetadataFetcher {
    /// 使用给定的提供商创建获取器。
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// 根据会话配置创建一个使用 `TikTokClient` 的获取器。
    pub fn from_config(config: SessionConfig) -> Result<Self> {
        Ok(Self::new(TikTokClient::new(config)?))
    }

    /// 获取视频信息，并以 `Result` 的形式返回。
    ///
    /// # 参数
    /// * `url` - 视频链接，最后一个路径段为视频 ID，可以带查询字符串。
    ///
    /// # 返回
    /// 成功时返回 `VideoData`；链接无效、会话失效、网络错误或平台返回错误时返回对应的 `TikTokHelperError`。
    pub async fn try_fetch(&self, url: &str) -> Result<VideoData> {
        let video_id = extract_video_id(url)?;
        tracing::debug!(
            "[Main] 从链接中提取到视频 ID: {video_id}，使用提供商 '{}'。",
            self.provider.name()
        );

        let video = self.provider.get_video_info(video_id).await?;
        Ok(video.into())
    }

    /// 获取视频信息，并把结果（包括所有错误）统一转换为 `FetchResult`。
    ///
    /// 此方法不会返回错误，也不会 panic。
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let result = self.try_fetch(url).await;
        if let Err(e) = &result {
            tracing::warn!(kind = %e.kind(), "[Main] 获取 '{url}' 失败: {e}");
        }
        result.into()
    }
}

/// 创建会话并获取一次视频信息。
///
/// 会话创建失败同样会被转换为失败的 `FetchResult`。
pub async fn fetch_video_info(url: &str, config: SessionConfig) -> FetchResult {
    match MetadataFetcher::from_config(config) {
        Ok(fetcher) => fetcher.fetch(url).await,
        Err(e) => {
            tracing::warn!(kind = %e.kind(), "[Main] 会话创建失败: {e}");
            FetchResult::failure(e.to_message())
        }
    }
}
