use crate::domain::DiaryCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --list-emotions: 感情語彙を表示
    pub list_emotions: bool,
    /// --interpret: 標準入力のモデル出力を解釈するだけ（通信なし）
    pub interpret: bool,
    /// -w / --watch: 標準入力の行を下書きに追記し、debounce 付きで分析し続ける
    pub watch: bool,
    /// --json: 結果を JSON 1 行で出力
    pub json: bool,
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub debounce_ms: Option<u64>,
    pub min_interval_ms: Option<u64>,
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("diary")
        .about("Analyze a diary entry with an LLM (summary, emotion, solution)")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-emotions")
                .long("list-emotions")
                .help("List the allowed emotion labels")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("interpret")
                .long("interpret")
                .help("Read a raw model response from stdin and interpret it (no network)")
                .conflicts_with_all(["watch", "positional"])
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("watch")
                .short('w')
                .long("watch")
                .help("Append stdin lines to a draft and analyze it after input settles")
                .conflicts_with("positional")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print results as JSON lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM provider (gemini, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gemini-2.0-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_name("ms")
                .help("Quiet period before a watched draft is analyzed")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("min-interval-ms")
                .long("min-interval-ms")
                .value_name("ms")
                .help("Minimum interval after a successful analysis before the next one")
                .value_parser(value_parser!(u64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Diary text (read from stdin when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_emotions: matches.get_flag("list-emotions"),
        interpret: matches.get_flag("interpret"),
        watch: matches.get_flag("watch"),
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        debounce_ms: matches.get_one::<u64>("debounce-ms").copied(),
        min_interval_ms: matches.get_one::<u64>("min-interval-ms").copied(),
        message_args: matches
            .get_many::<String>("positional")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

fn parse_matches(matches: clap::ArgMatches) -> ParseOutcome {
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return ParseOutcome::GenerateCompletion(shell);
    }
    ParseOutcome::Config(matches_to_config(&matches))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(parse_matches(matches))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(parse_matches(matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "diary", &mut std::io::stdout());
}

/// Config を DiaryCommand に変換する
pub fn config_to_command(config: &Config) -> DiaryCommand {
    if config.help {
        return DiaryCommand::Help;
    }
    if config.list_emotions {
        return DiaryCommand::ListEmotions;
    }
    if config.interpret {
        return DiaryCommand::Interpret;
    }
    if config.watch {
        return DiaryCommand::Watch;
    }
    let text = if config.message_args.is_empty() {
        None
    } else {
        Some(config.message_args.join(" "))
    };
    DiaryCommand::Analyze { text }
}
