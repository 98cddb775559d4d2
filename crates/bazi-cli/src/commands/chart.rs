//! 명반 / K선 / 공유 ID 명령.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use tracing::info;

use bazi_analytics::ChartEngine;
use bazi_core::{BirthInput, CalendarOracle};

/// 출력 설정.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// 출력 파일 경로 (없으면 stdout)
    pub path: Option<String>,
    /// JSON 들여쓰기
    pub pretty: bool,
}

/// 명반만 계산해 출력합니다.
pub fn run_paipan<O: CalendarOracle>(
    engine: &ChartEngine<O>,
    input: &BirthInput,
    output: &OutputOptions,
) -> Result<()> {
    let paipan = engine.paipan(input)?;
    info!(
        "✅ Paipan for {} (day master {})",
        input.name, paipan.four_pillars.day_master.stem
    );
    write_json(&paipan, output)
}

/// 명반과 K선을 함께 계산해 출력합니다.
pub fn run_compute<O: CalendarOracle>(
    engine: &ChartEngine<O>,
    input: &BirthInput,
    output: &OutputOptions,
) -> Result<()> {
    let computation = engine.compute(input)?;
    info!(
        "✅ Computed {} years, total score {}",
        computation.kline.years.len(),
        computation.kline.insight.total_score
    );
    write_json(&computation, output)
}

/// 공유 ID를 계산합니다.
pub fn share_id<O: CalendarOracle>(engine: &ChartEngine<O>, input: &BirthInput) -> Result<String> {
    let computation = engine.compute(input)?;
    Ok(computation.share_id()?)
}

/// JSON을 파일 또는 stdout으로 씁니다.
pub fn write_json<T: Serialize>(value: &T, output: &OutputOptions) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match &output.path {
        Some(path) => {
            fs::write(path, json.as_bytes())
                .with_context(|| format!("출력 파일을 쓸 수 없습니다: {}", path))?;
            info!("Saved to: {}", path);
            println!("저장 위치: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
