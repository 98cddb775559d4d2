//! 오행(五行) 정의.
//!
//! 상생(生)과 상극(克) 순환을 인덱스 산술로 표현합니다.
//! 순서는 木 → 火 → 土 → 金 → 水 입니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 오행.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    /// 木
    #[serde(rename = "木")]
    Wood,
    /// 火
    #[serde(rename = "火")]
    Fire,
    /// 土
    #[serde(rename = "土")]
    Earth,
    /// 金
    #[serde(rename = "金")]
    Metal,
    /// 水
    #[serde(rename = "水")]
    Water,
}

impl Element {
    /// 상생 순서의 전체 오행.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 상생 순서상의 인덱스 (木=0).
    pub fn index(self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 5]
    }

    /// 이 오행이 생(生)하는 오행. 木 → 火
    pub fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// 이 오행을 생하는 오행. 木 ← 水
    pub fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// 이 오행이 극(克)하는 오행. 木 → 土
    pub fn restrains(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// 이 오행을 극하는 오행. 木 ← 金
    pub fn restrained_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// 한자 표기.
    pub fn label(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// 한자 표기에서 파싱합니다.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == s)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
