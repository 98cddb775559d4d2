//! # BaZi Calendar
//!
//! 해석적 천문 공식으로 동작하는 달력 오라클 어댑터.
//!
//! - [`astro`]: 율리우스일, 태양 황경, 삭, 절기
//! - [`lunisolar`]: 양력 ⇄ 음력 변환, 윤달
//! - [`sexagenary`]: 시각 → 연·월·일·시 간지
//! - [`stages`]: 십이운성, 납음, 공망
//! - [`luck`]: 대운 방향, 기운 나이, 대운 목록
//! - [`oracle`]: `CalendarOracle` 구현체

pub mod astro;
pub mod luck;
pub mod lunisolar;
pub mod oracle;
pub mod sexagenary;
pub mod stages;

pub use oracle::AstronomicalOracle;
