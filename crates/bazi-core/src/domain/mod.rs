//! 명반 계산을 위한 도메인 모델.

mod birth;
mod calendar_oracle;
mod chart;
mod kline;

pub use birth::*;
pub use calendar_oracle::*;
pub use chart::*;
pub use kline::*;
