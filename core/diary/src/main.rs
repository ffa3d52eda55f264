mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use std::sync::Arc;

use async_trait::async_trait;
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::LogRecord;
use domain::{AnalyzeError, DiaryCommand, DiaryText};
use ports::inbound::UseCaseRunner;
use tokio::io::{AsyncReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use usecase::{run_watch, DebouncedAnalyzer};
use wiring::{wire_diary, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

#[async_trait]
impl UseCaseRunner for Runner {
    async fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::info("command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(cmd).await;

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::info("command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::error(e.to_string()).layer("cli").kind("error"));
        }
        result
    }
}

impl Runner {
    async fn dispatch(&self, cmd: DiaryCommand) -> Result<i32, Error> {
        match cmd {
            DiaryCommand::Help => {
                print_help();
                Ok(0)
            }
            DiaryCommand::ListEmotions => {
                for term in self.app.interpreter.vocabulary().sorted_terms() {
                    println!("{}", term);
                }
                Ok(0)
            }
            DiaryCommand::Interpret => {
                let raw = read_stdin().await?;
                let outcome = self
                    .app
                    .interpreter
                    .interpret(&raw)
                    .map_err(AnalyzeError::from);
                Ok(self.app.sink.deliver(&outcome))
            }
            DiaryCommand::Analyze { text } => {
                let text = match text {
                    Some(t) => t,
                    None => read_stdin().await?,
                };
                self.analyze_once(&text).await
            }
            DiaryCommand::Watch => {
                let use_case = Arc::new(self.app.analyze_use_case()?);
                let (analyzer, events) = DebouncedAnalyzer::new(
                    use_case,
                    self.app.debounce_policy(),
                    Arc::clone(&self.app.logger),
                );
                let input = BufReader::new(tokio::io::stdin());
                run_watch(input, analyzer, events, self.app.sink.as_ref(), async {
                    if tokio::signal::ctrl_c().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                })
                .await
            }
        }
    }

    /// 1 回だけ分析する。短すぎる本文はプロバイダを作る前に弾く。
    async fn analyze_once(&self, text: &str) -> Result<i32, Error> {
        let text = match DiaryText::parse(text, self.app.settings.min_chars) {
            Ok(t) => t,
            Err(e) => return Ok(self.app.sink.deliver(&Err(e))),
        };
        let use_case = self.app.analyze_use_case()?;
        let cancel = CancellationToken::new();
        let outcome = tokio::select! {
            outcome = use_case.analyze(&text, &cancel) => outcome,
            Ok(()) = tokio::signal::ctrl_c() => {
                cancel.cancel();
                Err(AnalyzeError::Cancelled)
            }
        };
        Ok(self.app.sink.deliver(&outcome))
    }
}

fn cmd_name_for_log(cmd: &DiaryCommand) -> &'static str {
    match cmd {
        DiaryCommand::Help => "help",
        DiaryCommand::ListEmotions => "list-emotions",
        DiaryCommand::Interpret => "interpret",
        DiaryCommand::Analyze { .. } => "analyze",
        DiaryCommand::Watch => "watch",
    }
}

async fn read_stdin() -> Result<String, Error> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .map_err(|e| Error::io_msg(format!("failed to read stdin: {}", e)))?;
    Ok(buf)
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("diary: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub async fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_diary(&config)?;
    let runner = Runner { app };
    runner.run(config).await
}

fn print_usage() {
    eprintln!("Usage: diary [options] [text...]");
}

fn print_help() {
    println!("Usage: diary [options] [text...]");
    println!("Options:");
    println!("  -h, --help                    Show this help message");
    println!("  -p, --profile <profile>       LLM provider (gemini, echo). Default: gemini");
    println!("  -m, --model <model>           Model name (e.g. gemini-2.0-flash)");
    println!("  -w, --watch                   Append stdin lines to a draft and analyze it after input settles");
    println!("      --interpret               Read a raw model response from stdin and interpret it (no network)");
    println!("      --list-emotions           List the allowed emotion labels");
    println!("      --json                    Print results as JSON lines");
    println!("      --debounce-ms <ms>        Quiet period before a watched draft is analyzed (default: 1500)");
    println!("      --min-interval-ms <ms>    Minimum interval after a successful analysis (default: 5000)");
    println!("  -v, --verbose                 Also write logs to stderr");
    println!("      --generate <shell>        Generate shell completion script");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY                API key for the gemini provider");
    println!("  DIARY_HOME                    Directory holding config.json and state/ (default: ~/.config/diary)");
    println!();
    println!("Examples:");
    println!("  diary 오늘은 친구와 공원에 가서 오래 이야기했다.");
    println!("  echo '오늘은 조금 피곤했지만 뿌듯했다.' | diary --json");
    println!("  diary -p echo --watch");
}
