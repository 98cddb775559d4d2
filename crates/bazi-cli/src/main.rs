//! BaZi 명반 / 인생 K선 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 양력 1990-01-01 12:00, 베이징
//! bazi paipan -d 1990-01-01 -t 12:00 --longitude 116.46
//!
//! # 음력 윤2월, 시간대 입력, K선까지 계산
//! bazi compute -c lunar -d 2023-02-10 --leap -s 午时 -g female --pretty
//!
//! # JSON 파일 입력
//! bazi compute -i birth.json -o result.json
//!
//! # 공유 ID
//! bazi share-id -i birth.json
//!
//! # 시간대 목록
//! bazi segments
//! ```

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use bazi_analytics::ChartEngine;
use bazi_calendar::AstronomicalOracle;
use bazi_cli::commands::chart::{run_compute, run_paipan, share_id, OutputOptions};
use bazi_cli::commands::input::InputArgs;
use bazi_cli::commands::segments::print_segments;
use bazi_core::{init_logging, AppConfig, LogConfig};

#[derive(Parser)]
#[command(name = "bazi")]
#[command(about = "BaZi CLI - 사주 명반과 100년 인생 K선", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (지정하지 않으면 config/default.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 명반(排盘) 계산
    Paipan {
        #[command(flatten)]
        input: InputArgs,

        /// 결과 저장 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// JSON 들여쓰기 출력
        #[arg(short, long)]
        pretty: bool,
    },

    /// 명반 + 인생 K선 계산
    Compute {
        #[command(flatten)]
        input: InputArgs,

        /// 결과 저장 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// JSON 들여쓰기 출력
        #[arg(short, long)]
        pretty: bool,
    },

    /// 계산 결과의 공유 ID (SHA-256 앞 10자리)
    ShareId {
        #[command(flatten)]
        input: InputArgs,
    },

    /// 출생 시간대 목록 보기
    Segments,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };

    init_logging(LogConfig::from_settings(&config.logging).with_env_overrides())
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let engine = ChartEngine::with_config(AstronomicalOracle::new(), &config.chart);

    match cli.command {
        Commands::Paipan {
            input,
            output,
            pretty,
        } => {
            let birth = input.resolve()?;
            let output = OutputOptions {
                path: output,
                pretty: pretty || config.output.pretty,
            };
            if let Err(e) = run_paipan(&engine, &birth, &output) {
                error!("Paipan failed: {}", e);
                return Err(e);
            }
        }

        Commands::Compute {
            input,
            output,
            pretty,
        } => {
            let birth = input.resolve()?;
            let output = OutputOptions {
                path: output,
                pretty: pretty || config.output.pretty,
            };
            if let Err(e) = run_compute(&engine, &birth, &output) {
                error!("Compute failed: {}", e);
                return Err(e);
            }
        }

        Commands::ShareId { input } => {
            let birth = input.resolve()?;
            let id = share_id(&engine, &birth)?;
            info!("✅ Share id for {}: {}", birth.name, id);
            println!("{}", id);
        }

        Commands::Segments => print_segments(),
    }

    Ok(())
}
