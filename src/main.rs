//! 命令行入口：获取一个视频的元数据，并向标准输出打印一行 JSON。
//!
//! ```bash
//! TIKTOK_SESSION_ID=... tiktok-info "https://www.tiktok.com/@user/video/7123456789012345678"
//! ```
//!
//! 日志只写入标准错误。除 `--help` 和 `--version` 外，标准输出始终只有一行 JSON，
//! 进程退出码始终为 0，参数无法解析时同样输出失败记录。

use std::ffi::OsString;

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use tracing_subscriber::EnvFilter;

use tiktok_helper_rs::{FetchResult, TikTokHelperError, config::SessionConfig, fetch_video_info};

#[derive(Parser, Debug)]
#[command(name = "tiktok-info", version, about = "获取 TikTok 视频的元数据并输出 JSON")]
struct Cli {
    /// 视频链接
    url: Option<String>,

    /// 单次请求的超时秒数，覆盖配置文件和环境变量
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// 多余的位置参数，会被忽略
    #[arg(hide = true)]
    rest: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = match parse_args(std::env::args_os()) {
        Ok(cli) => run(cli).await,
        Err(e) => FetchResult::failure(e.to_message()),
    };

    match result.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("[Main] 结果序列化失败: {e}");
            println!(r#"{{"success": false, "message": "结果序列化失败。"}}"#);
        }
    }
}

/// 解析命令行参数。
///
/// `--help` 和 `--version` 保持 clap 的默认行为（打印后退出），
/// 其余解析错误都转换为 `TikTokHelperError::InvalidArgument`。
fn parse_args<I, T>(args: I) -> Result<Cli, TikTokHelperError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ClapErrorKind::DisplayHelp
        | ClapErrorKind::DisplayVersion
        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        _ => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            let reason = first_line.strip_prefix("error: ").unwrap_or(first_line);
            tracing::warn!("[Main] 命令行参数无法解析: {reason}");
            TikTokHelperError::InvalidArgument(reason.to_string())
        }
    })?;

    if !cli.rest.is_empty() {
        tracing::debug!("[Main] 忽略多余的参数: {:?}", cli.rest);
    }
    Ok(cli)
}

async fn run(cli: Cli) -> FetchResult {
    let Some(url) = cli.url else {
        return FetchResult::missing_argument();
    };

    let mut config = match SessionConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(kind = %e.kind(), "[Main] 加载会话配置失败: {e}");
            return FetchResult::failure(e.to_message());
        }
    };
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }

    fetch_video_info(&url, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_argument_output() {
        let cli = parse_args(["tiktok-info"]).unwrap();
        let result = run(cli).await;
        insta::assert_snapshot!(
            result.to_json().unwrap(),
            @r#"{"success": false, "message": "缺少 URL 参数。"}"#
        );
    }

    #[test]
    fn test_cli_parses_url_and_timeout() {
        let cli = parse_args([
            "tiktok-info",
            "--timeout",
            "15",
            "https://www.tiktok.com/@a/video/1?lang=en",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://www.tiktok.com/@a/video/1?lang=en"));
        assert_eq!(cli.timeout, Some(15));
        assert!(cli.rest.is_empty());
    }

    #[tokio::test]
    async fn test_extra_arguments_are_ignored() {
        let cli = parse_args(["tiktok-info", "https://www.tiktok.com/@a/video/", "extra"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://www.tiktok.com/@a/video/"));
        assert_eq!(cli.rest, ["extra"]);

        let result = run(cli).await;
        assert!(!result.is_success());
        assert!(result.message().unwrap().starts_with("[invalid_url]"));
    }

    #[test]
    fn test_bad_timeout_is_a_failure_record() {
        let err = parse_args([
            "tiktok-info",
            "--timeout",
            "abc",
            "https://www.tiktok.com/@a/video/1",
        ])
        .unwrap_err();

        let result = FetchResult::failure(err.to_message());
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("[invalid_argument]"), "{message}");
        assert!(message.contains("abc"), "{message}");
    }

    #[test]
    fn test_unknown_flag_is_a_failure_record() {
        let err = parse_args(["tiktok-info", "--verbose"]).unwrap_err();
        assert!(matches!(err, TikTokHelperError::InvalidArgument(_)));
        assert!(!err.to_message().contains('\n'));
    }
}
