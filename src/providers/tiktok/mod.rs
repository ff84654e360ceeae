//! 此模块实现了与 TikTok 网页端 API 进行交互的 `Provider`。

use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{COOKIE, HeaderValue, REFERER},
};
use tracing::{debug, info};

use crate::{
    config::SessionConfig,
    error::{Result, TikTokHelperError},
    model::generic::{VideoAuthor, VideoRecord, VideoStats},
    providers::Provider,
};

pub mod models;

const BASE_URL_TIKTOK: &str = "https://www.tiktok.com";
const ITEM_DETAIL_PATH: &str = "/api/item/detail/";
const WEB_AID: &str = "1988";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// 表示视频已删除、私密或不可见的状态码。
const NOT_FOUND_STATUS_CODES: [i64; 2] = [10204, 10216];

/// TikTok 的客户端实现。
///
/// 每个实例对应一个会话，凭据在构造时传入，之后不再改变。
#[derive(Debug, Clone)]
pub struct TikTokClient {
    http_client: Client,
    base_url: String,
    session: SessionConfig,
    /// 网页端请求需要携带的设备 ID，随机生成。
    device_id: String,
}

impl TikTokClient {
    /// 根据会话配置创建一个新的 `TikTokClient` 实例。
    pub fn new(session: SessionConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = session.timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let base_url = session
            .base_url
            .as_deref()
            .unwrap_or(BASE_URL_TIKTOK)
            .trim_end_matches('/')
            .to_string();
        let device_id = rand::random_range(7_000_000_000_000_000_000u64..7_999_999_999_999_999_999)
            .to_string();

        info!(
            "[TikTok] 会话已创建 (sessionid: {}, verifyFp: {}, msToken: {})",
            presence(&session.session_id),
            presence(&session.verify_fp),
            presence(&session.ms_token),
        );

        Ok(Self {
            http_client,
            base_url,
            session,
            device_id,
        })
    }

    /// 构建详情接口的查询参数。
    fn query_params(&self, video_id: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("itemId", video_id.to_string()),
            ("aid", WEB_AID.to_string()),
            ("app_name", "tiktok_web".to_string()),
            ("app_language", "en".to_string()),
            ("device_platform", "web_pc".to_string()),
            ("device_id", self.device_id.clone()),
        ];
        if let Some(verify_fp) = &self.session.verify_fp {
            params.push(("verifyFp", verify_fp.clone()));
        }
        if let Some(ms_token) = &self.session.ms_token {
            params.push(("msToken", ms_token.clone()));
        }
        params
    }

    /// 由会话配置拼出 Cookie 头，没有任何凭据时返回 `None`。
    fn cookie_header(&self) -> Result<Option<HeaderValue>> {
        let pairs: Vec<String> = [
            ("sessionid", &self.session.session_id),
            ("s_v_web_id", &self.session.verify_fp),
            ("msToken", &self.session.ms_token),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| format!("{name}={v}")))
        .collect();

        if pairs.is_empty() {
            return Ok(None);
        }

        pairs
            .join("; ")
            .parse::<HeaderValue>()
            .map(Some)
            .map_err(|e| TikTokHelperError::Config(format!("会话凭据包含非法字符: {e}")))
    }
}

#[async_trait]
impl Provider for TikTokClient {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    async fn get_video_info(&self, video_id: &str) -> Result<VideoRecord> {
        let url = format!("{}{ITEM_DETAIL_PATH}", self.base_url);
        debug!("[TikTok] 请求视频详情: {url} (itemId: {video_id})");

        let mut request = self
            .http_client
            .get(&url)
            .query(&self.query_params(video_id))
            .header(REFERER, format!("{}/", self.base_url));
        if let Some(cookie) = self.cookie_header()? {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        check_status(response.status())?;
        let body = response.text().await?;

        let video = parse_item_detail(video_id, &body)?;
        info!(
            "[TikTok] 已获取视频 {} (作者: @{}, 发布于: {})",
            video.id,
            video.author.unique_id,
            video
                .created_at()
                .map_or_else(|| "未知".to_string(), |t| t.to_rfc3339()),
        );
        Ok(video)
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() { "已设置" } else { "未设置" }
}

/// 将 HTTP 状态码映射为错误分类。
fn check_status(status: StatusCode) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(TikTokHelperError::Auth(format!(
            "平台拒绝了请求 (HTTP {status})，会话可能已失效"
        )))
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        Err(TikTokHelperError::RateLimited(format!("HTTP {status}")))
    } else if !status.is_success() {
        Err(TikTokHelperError::Network(format!(
            "详情接口返回 HTTP {status}"
        )))
    } else {
        Ok(())
    }
}

/// 解析详情接口的响应正文。
fn parse_item_detail(video_id: &str, body: &str) -> Result<VideoRecord> {
    // 未通过风控校验时，平台会返回状态 200 但正文为空。
    if body.trim().is_empty() {
        return Err(TikTokHelperError::ApiError(
            "详情接口返回了空响应，可能需要有效的 sessionid 或 verifyFp。".to_string(),
        ));
    }

    let response: models::ItemDetailResponse = serde_json::from_str(body)?;

    let status = response.effective_status();
    if NOT_FOUND_STATUS_CODES.contains(&status) {
        return Err(TikTokHelperError::VideoNotFound(video_id.to_string()));
    }
    if status != 0 {
        return Err(TikTokHelperError::ApiError(format!(
            "详情接口返回状态码 {status}: {}",
            response.status_msg.as_deref().unwrap_or_default()
        )));
    }

    response
        .item_info
        .and_then(|info| info.item_struct)
        .map(Into::into)
        .ok_or_else(|| TikTokHelperError::VideoNotFound(video_id.to_string()))
}

impl From<models::ItemStruct> for VideoRecord {
    fn from(item: models::ItemStruct) -> Self {
        let hd_download_url = best_bitrate_url(&item.video.bitrate_info)
            .or_else(|| non_empty(&item.video.download_addr))
            .unwrap_or(item.video.play_addr.as_str())
            .to_string();

        VideoRecord {
            id: item.id,
            author: item.author.into(),
            description: item.desc,
            cover_url: item.video.cover,
            hd_download_url,
            download_url: item.video.play_addr,
            music_url: item.music.play_url,
            stats: VideoStats {
                play_count: item.stats.play_count,
                digg_count: item.stats.digg_count,
                comment_count: item.stats.comment_count,
                share_count: item.stats.share_count,
            },
            create_time: item.create_time,
        }
    }
}

impl From<models::Author> for VideoAuthor {
    fn from(author: models::Author) -> Self {
        let avatar = [author.avatar_larger, author.avatar_medium, author.avatar_thumb]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
            .unwrap_or_default();

        VideoAuthor {
            unique_id: author.unique_id,
            nickname: author.nickname,
            avatar,
        }
    }
}

/// 在所有码率中选出码率最高、且有可用地址的那一个。
fn best_bitrate_url(bitrates: &[models::BitrateInfo]) -> Option<&str> {
    bitrates
        .iter()
        .filter_map(|b| {
            b.play_addr
                .url_list
                .first()
                .filter(|url| !url.is_empty())
                .map(|url| (b.bitrate, url.as_str()))
        })
        .max_by_key(|(bitrate, _)| *bitrate)
        .map(|(_, url)| url)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
