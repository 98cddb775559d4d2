//! 명반 계산 및 인생 K선 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 출생 시간 정규화와 진태양시 보정
//! - 네 기둥 정규화, 일간 강약, 대운 조립
//! - 1~100세 K선 점수, 대운 단계 요약, 전체 인사이트
//!
//! # Re-exports
//!
//! - [`chart`]: 명반 단계 (PillarBuilder, StrengthEvaluator, LuckAssembler)
//! - [`kline`]: K선 단계 (KLineGenerator, StageWriter)
//! - [`engine`]: 전체 파이프라인 (ChartEngine)

pub mod chart;
pub mod engine;
pub mod kline;
pub mod normalizer;
pub mod solar_time;

// Chart 모듈 re-exports
pub use chart::{
    LuckAssembler, LuckAssembly, LuckRequest, PillarBuilder, StrengthEvaluation,
    StrengthEvaluator,
};

// K-line 모듈 re-exports
pub use kline::{
    ChartContext, ClashFactor, FactorWeights, KLineGenerator, RelationLabel, RelationScore,
    YearScore,
};

pub use engine::ChartEngine;
pub use normalizer::{normalize, NormalizedTime};
pub use solar_time::{SolarCorrection, SolarTimeCorrector};
