//! # トレーシング初期化
//!
//! `LOG_FORMAT` と `RUST_LOG` から [`TracingConfig`] を組み立て、
//! [`init_tracing`] で subscriber を登録する。
//!
//! 設定の解釈は subscriber の登録より前に行われるため、解釈できなかった値は
//! [`TracingConfig`] に保持しておき、登録後に `tracing::warn!` で報告する。

use std::env;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,askflow=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（ログ収集基盤向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する（前後の空白と大文字小文字は無視）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// サービス名（初期化ログに出力）
    pub service_name:    String,
    pub log_format:      LogFormat,
    /// `EnvFilter` のディレクティブ
    pub filter:          String,
    /// 解釈できなかった `LOG_FORMAT` の値
    pub rejected_format: Option<String>,
}

impl TracingConfig {
    /// 環境変数から設定を読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| env::var(key).ok())
    }

    fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let (log_format, rejected_format) = match lookup("LOG_FORMAT") {
            None => (LogFormat::default(), None),
            Some(value) => match LogFormat::parse(&value) {
                Some(format) => (format, None),
                None => (LogFormat::default(), Some(value)),
            },
        };
        let filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            service_name: service_name.into(),
            log_format,
            filter,
            rejected_format,
        }
    }
}

/// トレーシングを初期化する
///
/// `tracing_error::ErrorLayer` も登録し、`InfraError` が捕捉する SpanTrace に
/// リポジトリのスパンが載るようにする。フィルタが不正な場合は
/// [`DEFAULT_LOG_FILTER`] で起動する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let (env_filter, filter_error) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    if let Some(value) = &config.rejected_format {
        tracing::warn!(log_format = %value, "LOG_FORMAT を解釈できないため pretty で出力します");
    }
    if let Some(e) = filter_error {
        tracing::warn!(
            filter = %config.filter,
            error = %e,
            "RUST_LOG が不正なためデフォルトのフィルタを使用します"
        );
    }
    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}
