// ==========================================
// 站台股道分配 - 命令行入口
// ==========================================
// 用法:
//   admissible-tracks <request.json> [inventory.(json|csv|xlsx)] [config.json]
//
// 未给出配置文件时按 ADMISSIBLE_TRACKS_CONFIG → 用户配置目录 → 内置默认 的顺序加载
// 未给出股道清单时请求必须携带 tracks_override
// ==========================================

use admissible_tracks::api::SuggestionApi;
use admissible_tracks::config::ConfigManager;
use admissible_tracks::{i18n, importer, logging};
use anyhow::Context;
use std::path::PathBuf;
use std::process::ExitCode;

fn run() -> anyhow::Result<String> {
    let mut args = std::env::args().skip(1);
    let request_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: admissible-tracks <request.json> [inventory] [config.json]")?;
    let inventory_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    let config = ConfigManager::load(config_path.as_deref())?;
    let locale = config.locale()?;
    if !i18n::is_supported(&locale) {
        tracing::warn!(locale = %locale, "不支持的说明语言,将回退到英文");
    }
    i18n::set_locale(&locale);

    let inventory = inventory_path
        .as_deref()
        .map(importer::load_inventory)
        .transpose()?;

    let request = std::fs::read_to_string(&request_path)
        .with_context(|| format!("无法读取请求文件 {}", request_path.display()))?;

    let api = SuggestionApi::new(config, inventory);
    Ok(api.suggest_json(&request)?)
}

fn main() -> ExitCode {
    logging::init();

    tracing::info!("{} v{}", admissible_tracks::APP_NAME, admissible_tracks::VERSION);

    match run() {
        Ok(response) => {
            println!("{}", response);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "请求处理失败");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
