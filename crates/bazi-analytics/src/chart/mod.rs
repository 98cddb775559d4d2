//! 명반(排盘) 단계: 기둥 빌더, 강약 평가, 대운 조립.

pub mod luck;
pub mod pillar_builder;
pub mod strength;

pub use luck::{LuckAssembler, LuckAssembly, LuckRequest};
pub use pillar_builder::{shen_sha, PillarBuilder};
pub use strength::{StrengthEvaluation, StrengthEvaluator};
