//! 配線: 標準アダプタで App を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StderrLog, StdEnvResolver, StdFileSystem, TeeLog};
use common::domain::{EmotionVocabulary, HomeDir};
use common::error::Error;
use common::llm::create_provider;
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};
use common::ResponseInterpreter;

use crate::adapter::{resolve_settings, Settings, StdConfigLoader, StdoutSink};
use crate::cli::Config;
use crate::ports::outbound::{AnalysisSink, ConfigLoader};
use crate::usecase::{AnalyzeUseCase, DebouncePolicy};

/// 組み立て済みのアプリケーション（Runner が使う部品一式）
pub struct App {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub logger: Arc<dyn Log>,
    pub sink: Arc<dyn AnalysisSink>,
    pub settings: Settings,
    pub interpreter: ResponseInterpreter,
}

impl App {
    /// 分析ユースケースを作る（ここで初めてプロバイダを生成する。API キーが無ければ Error::Env）
    pub fn analyze_use_case(&self) -> Result<AnalyzeUseCase, Error> {
        let provider = create_provider(&self.settings.provider, self.env_resolver.as_ref())?;
        let _ = self.logger.log(
            &LogRecord::info("provider ready")
                .layer("wiring")
                .kind("config")
                .field("provider", provider.name()),
        );
        Ok(AnalyzeUseCase::new(
            provider,
            self.interpreter.clone(),
            Arc::clone(&self.logger),
        ))
    }

    pub fn debounce_policy(&self) -> DebouncePolicy {
        DebouncePolicy {
            debounce: self.settings.debounce,
            min_interval: self.settings.min_interval,
            min_chars: self.settings.min_chars,
        }
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_diary(config: &Config) -> Result<App, Error> {
    wire_with(
        config,
        Arc::new(StdFileSystem),
        Arc::new(StdEnvResolver),
        Arc::new(StdoutSink::new(config.json)),
    )
}

/// アダプタを差し替えて App を組み立てる（テストからも使う）
///
/// ホームが解決できなければ設定ファイル・ログファイルなしで動く。
pub fn wire_with(
    config: &Config,
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
    sink: Arc<dyn AnalysisSink>,
) -> Result<App, Error> {
    let home: Option<HomeDir> = env_resolver.resolve_home_dir().ok();
    let logger = make_logger(Arc::clone(&fs), home.as_ref(), config.verbose);

    let loader = StdConfigLoader::new(fs, home.as_ref().map(|h| h.config_path()));
    let file_config = loader.load()?;
    let settings = resolve_settings(config, &file_config)?;

    let vocabulary = match &settings.emotions {
        Some(terms) => EmotionVocabulary::from_terms(terms.iter().map(String::as_str)),
        None => EmotionVocabulary::korean(),
    };
    let _ = logger.log(
        &LogRecord::debug("settings resolved")
            .layer("wiring")
            .kind("config")
            .field("provider", settings.provider.provider_type.as_str())
            .field("debounce_ms", settings.debounce.as_millis() as u64)
            .field("min_interval_ms", settings.min_interval.as_millis() as u64)
            .field("emotions", vocabulary.len()),
    );

    Ok(App {
        env_resolver,
        logger,
        sink,
        settings,
        interpreter: ResponseInterpreter::new(Arc::new(vocabulary)),
    })
}

fn make_logger(fs: Arc<dyn FileSystem>, home: Option<&HomeDir>, verbose: bool) -> Arc<dyn Log> {
    let file: Arc<dyn Log> = match home {
        Some(h) => Arc::new(FileJsonLog::new(fs, h.log_path())),
        None => Arc::new(NoopLog),
    };
    if verbose {
        Arc::new(TeeLog::new(vec![file, Arc::new(StderrLog::new(LogLevel::Debug))]))
    } else {
        file
    }
}
