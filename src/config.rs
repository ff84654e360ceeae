//! 负责加载会话配置。
//!
//! 会话 ID、验证指纹等凭据只从配置文件或环境变量读取，绝不写死在代码中。
//! 加载顺序（后者覆盖前者）：
//! 1. 用户配置目录下的 `tiktok-helper/session.json`；
//! 2. 环境变量（启动时会先尝试读取当前目录的 `.env`）。

use std::{fmt, fs, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TikTokHelperError};

/// 会话 ID 对应的环境变量。
pub const ENV_SESSION_ID: &str = "TIKTOK_SESSION_ID";
/// 验证指纹 (`verifyFp`) 对应的环境变量。
pub const ENV_VERIFY_FP: &str = "TIKTOK_VERIFY_FP";
/// `msToken` 对应的环境变量。
pub const ENV_MS_TOKEN: &str = "TIKTOK_MS_TOKEN";
/// 请求超时秒数对应的环境变量。
pub const ENV_TIMEOUT_SECS: &str = "TIKTOK_TIMEOUT_SECS";
/// API 根地址对应的环境变量。
pub const ENV_BASE_URL: &str = "TIKTOK_BASE_URL";

const CONFIG_DIR_NAME: &str = "tiktok-helper";
const SESSION_FILE_NAME: &str = "session.json";

/// 访问视频平台所需的会话配置。
///
/// 所有字段都是可选的，原样传给客户端，由平台决定哪些是必需的。
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// 登录后获得的 `sessionid` Cookie。
    pub session_id: Option<String>,
    /// 验证指纹，形如 `verify_xxx`，同时作为 `s_v_web_id` Cookie 发送。
    pub verify_fp: Option<String>,
    /// `msToken` Cookie。
    pub ms_token: Option<String>,
    /// 单次请求的超时秒数，未设置时不限制。
    pub timeout_secs: Option<u64>,
    /// 覆盖默认的 API 根地址。
    pub base_url: Option<String>,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("session_id", &self.session_id.as_deref().map(redact))
            .field("verify_fp", &self.verify_fp.as_deref().map(redact))
            .field("ms_token", &self.ms_token.as_deref().map(redact))
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// 只保留前 4 个字符，用于日志输出。
fn redact(secret: &str) -> String {
    let head: String = secret.chars().take(4).collect();
    format!("{head}***")
}

impl SessionConfig {
    /// 从配置文件和环境变量加载完整的会话配置。
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = load_session_file()?.unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok())?;
        debug!("会话配置: {config:?}");
        Ok(config)
    }

    /// 用 `lookup` 返回的值覆盖当前配置。
    ///
    /// 空字符串视为未设置。
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_SESSION_ID) {
            self.session_id = Some(v);
        }
        if let Some(v) = get(ENV_VERIFY_FP) {
            self.verify_fp = Some(v);
        }
        if let Some(v) = get(ENV_MS_TOKEN) {
            self.ms_token = Some(v);
        }
        if let Some(v) = get(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
        if let Some(v) = get(ENV_TIMEOUT_SECS) {
            let secs = v.parse::<u64>().map_err(|e| {
                TikTokHelperError::Config(format!("{ENV_TIMEOUT_SECS} 不是有效的秒数 '{v}': {e}"))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// 请求超时时长，`0` 与未设置等价。
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// 获取会话配置文件的完整路径。
pub fn session_file_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| TikTokHelperError::Config("无法找到用户配置目录".to_string()))?;
    path.push(CONFIG_DIR_NAME);
    path.push(SESSION_FILE_NAME);
    Ok(path)
}

/// 从配置目录读取会话文件，文件不存在时返回 `None`。
fn load_session_file() -> Result<Option<SessionConfig>> {
    let path = match session_file_path() {
        Ok(path) => path,
        // 没有配置目录的环境（例如精简容器）只使用环境变量。
        Err(_) => return Ok(None),
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            let config = parse_session_file(&content).map_err(|e| {
                TikTokHelperError::Config(format!("无法解析 {}: {e}", path.display()))
            })?;
            info!("已从 {} 加载会话配置。", path.display());
            Ok(Some(config))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_session_file(content: &str) -> serde_json::Result<SessionConfig> {
    serde_json::from_str(content)
}
