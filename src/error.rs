//! 定义了整个 `tiktok-helper` 库的错误类型 `TikTokHelperError`。

use std::{fmt, io, string::FromUtf8Error};
use thiserror::Error;

/// `tiktok-helper` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum TikTokHelperError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// UTF-8 转换失败 (源自 `string::FromUtf8Error`)
    #[error("UTF-8 转换失败: {0}")]
    FromUtf8(#[from] FromUtf8Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 命令行参数无法解析
    #[error("参数错误: {0}")]
    InvalidArgument(String),

    /// 无法从链接中提取视频 ID
    #[error("无效的视频链接: '{0}'")]
    InvalidUrl(String),

    /// 会话无效或被平台拒绝
    #[error("认证失败: {0}")]
    Auth(String),

    /// API 请求被限流
    #[error("API 请求被限流: {0}")]
    RateLimited(String),

    /// 更通用的网络层错误
    #[error("网络错误: {0}")]
    Network(String),

    /// API 返回错误或空数据
    #[error("API 返回了错误或空数据: {0}")]
    ApiError(String),

    /// 平台上找不到该视频
    #[error("未找到视频: '{0}'")]
    VideoNotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// `TikTokHelperError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, TikTokHelperError>;

/// 错误的粗略分类，用于生成失败消息和日志字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 命令行参数不正确。
    InvalidArgument,
    /// 链接格式不正确。
    InvalidUrl,
    /// 会话或认证问题（包括限流）。
    Auth,
    /// 连接、超时等网络问题。
    Network,
    /// 响应无法解析。
    Parse,
    /// 平台返回了错误。
    Api,
    /// 视频不存在或不可见。
    NotFound,
    /// 本地配置问题。
    Config,
    /// 其他内部错误。
    Internal,
}

impl ErrorKind {
    /// 分类的短标识，例如 `"network"`。
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidUrl => "invalid_url",
            Self::Auth => "auth",
            Self::Network => "network",
            Self::Parse => "parse",
            Self::Api => "api",
            Self::NotFound => "not_found",
            Self::Config => "config",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TikTokHelperError {
    /// 返回该错误所属的分类。
    ///
    /// 解码失败的 `reqwest::Error` 归为解析错误，其余归为网络错误。
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Reqwest(e) if e.is_decode() => ErrorKind::Parse,
            Self::Reqwest(_) => ErrorKind::Network,
            Self::JsonParse(_) => ErrorKind::Parse,
            Self::FromUtf8(_) | Self::Io(_) => ErrorKind::Internal,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::Auth(_) | Self::RateLimited(_) => ErrorKind::Auth,
            Self::Network(_) => ErrorKind::Network,
            Self::ApiError(_) => ErrorKind::Api,
            Self::VideoNotFound(_) => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// 生成面向调用方的失败消息，格式为 `[分类] 错误描述`。
    pub fn to_message(&self) -> String {
        format!("[{}] {}", self.kind(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_domain_errors() {
        assert_eq!(
            TikTokHelperError::InvalidUrl(String::new()).kind(),
            ErrorKind::InvalidUrl
        );
        assert_eq!(
            TikTokHelperError::RateLimited("429".into()).kind(),
            ErrorKind::Auth
        );
        assert_eq!(
            TikTokHelperError::VideoNotFound("1".into()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = TikTokHelperError::InvalidArgument("unexpected argument 'x'".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err.to_message(),
            "[invalid_argument] 参数错误: unexpected argument 'x'"
        );
    }

    #[test]
    fn test_json_error_is_parse_kind() {
        let err: TikTokHelperError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_message().starts_with("[parse] JSON 解析失败"));
    }

    #[test]
    fn test_message_format() {
        let err = TikTokHelperError::InvalidUrl("https://www.tiktok.com/".to_string());
        assert_eq!(
            err.to_message(),
            "[invalid_url] 无效的视频链接: 'https://www.tiktok.com/'"
        );
    }
}
