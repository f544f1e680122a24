//! 哈萨克语词汇平台管理控制台（命令行）

use clap::Parser;
use kazlearn_admin::api::TokenStore;
use kazlearn_admin::cli::{Cli, CommandRunner};
use kazlearn_admin::notify::ToastLevel;
use kazlearn_admin::state::ConsoleState;
use kazlearn_shared::i18n::{self, Localizer};
use kazlearn_shared::{config::AppConfig, observability};
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load("kazlearn-admin").unwrap_or_else(|e| {
        eprintln!("failed to load configuration, using defaults: {e}");
        AppConfig::default()
    });
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(locale) = &cli.locale {
        config.ui.locale = locale.clone();
    }

    // 命令行参数优先于配置文件，RUST_LOG 优先于两者
    let obs_config = config
        .observability
        .clone()
        .with_service_name("kazlearn-admin")
        .with_log_level(cli.log_level.as_deref());
    let _guard = observability::init(&obs_config)?;

    let tokens = TokenStore::file(config.auth.resolve_storage_path()?);
    let localizer = i18n::init(Localizer::from_config(&config.ui)?)?;
    let state = ConsoleState::with_localizer(&config, tokens.clone(), localizer)?;
    let runner = CommandRunner::new(state.clone(), tokens);

    let result = runner.run(cli.command).await;

    if let Ok(lines) = &result {
        for line in lines {
            println!("{line}");
        }
    }
    let toasts = state.toaster.drain();
    for toast in &toasts {
        match toast.level {
            ToastLevel::Error | ToastLevel::Warning => {
                eprintln!("[{}] {}", toast.level.label(), toast.message)
            }
            _ => println!("[{}] {}", toast.level.label(), toast.message),
        }
    }

    if let Err(err) = result {
        warn!(error = %err, "命令执行失败");
        let shown = toasts.iter().any(|t| t.level == ToastLevel::Error);
        if !shown {
            for line in runner.describe_error(&err) {
                eprintln!("{line}");
            }
        }
        std::process::exit(1);
    }
    Ok(())
}
