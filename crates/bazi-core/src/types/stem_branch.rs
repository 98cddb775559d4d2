//! 천간(天干)과 지지(地支).
//!
//! 지지 간의 관계표(육충, 육합, 煞 방위, 지장간)는 모두 이 모듈의
//! 고정 테이블로 정의됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Element;

// =============================================================================
// 천간
// =============================================================================

/// 천간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

impl Stem {
    /// 甲부터 癸까지의 순서.
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    const LABELS: [&'static str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

    /// 순서 인덱스 (甲=0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// 인덱스에서 천간을 얻습니다. 10으로 나눈 나머지를 사용합니다.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 10]
    }

    /// 천간의 오행. 甲乙木 丙丁火 戊己土 庚辛金 壬癸水
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }

    /// 양간 여부 (甲丙戊庚壬).
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// 한자 표기.
    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// 한자 한 글자에서 파싱합니다.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|l| *l == s)
            .map(Self::from_index)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// 지지
// =============================================================================

/// 지지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

/// 煞 방위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "南")]
    South,
    #[serde(rename = "东")]
    East,
    #[serde(rename = "北")]
    North,
    #[serde(rename = "西")]
    West,
}

impl Direction {
    /// 한자 표기.
    pub fn label(self) -> &'static str {
        match self {
            Direction::South => "南",
            Direction::East => "东",
            Direction::North => "北",
            Direction::West => "西",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Branch {
    /// 子부터 亥까지의 순서.
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    const LABELS: [&'static str; 12] = [
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];

    const ELEMENTS: [Element; 12] = [
        Element::Water,
        Element::Earth,
        Element::Wood,
        Element::Wood,
        Element::Earth,
        Element::Fire,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Metal,
        Element::Earth,
        Element::Water,
    ];

    /// 순서 인덱스 (子=0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// 인덱스에서 지지를 얻습니다. 12로 나눈 나머지를 사용합니다.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// 지지의 오행. 월지의 계절 오행과 같은 표를 씁니다.
    pub fn element(self) -> Element {
        Self::ELEMENTS[self.index()]
    }

    /// 육충 상대. 子↔午 丑↔未 寅↔申 卯↔酉 辰↔戌 巳↔亥
    pub fn clash_partner(self) -> Self {
        Self::from_index(self.index() + 6)
    }

    /// 두 지지가 충(冲)하는지.
    pub fn clashes(self, other: Branch) -> bool {
        self.clash_partner() == other
    }

    /// 육합 상대. 子丑 寅亥 卯戌 辰酉 巳申 午未
    pub fn combination_partner(self) -> Self {
        match self {
            Branch::Zi => Branch::Chou,
            Branch::Chou => Branch::Zi,
            Branch::Yin => Branch::Hai,
            Branch::Hai => Branch::Yin,
            Branch::Mao => Branch::Xu,
            Branch::Xu => Branch::Mao,
            Branch::Chen => Branch::You,
            Branch::You => Branch::Chen,
            Branch::Si => Branch::Shen,
            Branch::Shen => Branch::Si,
            Branch::Wu => Branch::Wei,
            Branch::Wei => Branch::Wu,
        }
    }

    /// 두 지지가 합(合)하는지.
    pub fn combines(self, other: Branch) -> bool {
        self.combination_partner() == other
    }

    /// 煞 방위. 申子辰 南, 巳酉丑 东, 寅午戌 北, 亥卯未 西
    pub fn sha_direction(self) -> Direction {
        match self.index() % 4 {
            0 => Direction::South,
            1 => Direction::East,
            2 => Direction::North,
            _ => Direction::West,
        }
    }

    /// 지장간(藏干). 본기가 먼저 옵니다.
    pub fn hidden_stems(self) -> &'static [Stem] {
        use Stem::*;
        match self {
            Branch::Zi => &[Gui],
            Branch::Chou => &[Ji, Gui, Xin],
            Branch::Yin => &[Jia, Bing, Wu],
            Branch::Mao => &[Yi],
            Branch::Chen => &[Wu, Yi, Gui],
            Branch::Si => &[Bing, Geng, Wu],
            Branch::Wu => &[Ding, Ji],
            Branch::Wei => &[Ji, Ding, Yi],
            Branch::Shen => &[Geng, Ren, Wu],
            Branch::You => &[Xin],
            Branch::Xu => &[Wu, Xin, Ding],
            Branch::Hai => &[Ren, Jia],
        }
    }

    /// 한자 표기.
    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// 한자 한 글자에서 파싱합니다.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .position(|l| *l == s)
            .map(Self::from_index)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
