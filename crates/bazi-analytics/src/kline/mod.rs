//! 인생 K선: 연도 점수, 대운 단계, 인사이트.

pub mod generator;
pub mod insight;
pub mod relation;
pub mod stages;

pub use generator::{ChartContext, FactorWeights, KLineGenerator, YearScore};
pub use relation::{ClashFactor, RelationLabel, RelationScore};
pub use stages::{StageContext, StageWriter};
