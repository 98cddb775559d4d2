//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 파일(TOML)과 `BAZI__` 접두사 환경 변수를 합쳐서 읽습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ChartResult;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 명반 계산 설정
    #[serde(default)]
    pub chart: ChartConfig,
    /// 출력 설정
    #[serde(default)]
    pub output: OutputConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// 명반 계산 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartConfig {
    /// 표준 자오선 (동경, 도)
    pub standard_meridian: f64,
    /// 경도 1도당 보정 분
    pub minutes_per_degree: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            standard_meridian: 120.0,
            minutes_per_degree: 4.0,
        }
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// JSON 들여쓰기 출력
    pub pretty: bool,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ChartResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?
            .set_default("chart.standard_meridian", 120.0)?
            .set_default("chart.minutes_per_degree", 4.0)?
            .set_default("output.pretty", false)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BAZI")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ChartResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
