//! 육십갑자(六十甲子).

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{Branch, Element, Stem};

/// 甲子년 기준 연도.
pub const CYCLE_EPOCH_YEAR: i32 = 1984;

/// 간지 한 쌍 (예: 甲子).
///
/// 천간과 지지의 음양이 같은 60개 조합만 만들 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GanZhi {
    stem: Stem,
    branch: Branch,
}

impl GanZhi {
    /// 천간과 지지로 간지를 만듭니다. 음양이 다르면 `None`.
    pub fn new(stem: Stem, branch: Branch) -> Option<Self> {
        (stem.index() % 2 == branch.index() % 2).then_some(Self { stem, branch })
    }

    /// 60갑자 순번(甲子=0)에서 간지를 만듭니다.
    pub fn from_cycle_index(index: usize) -> Self {
        Self {
            stem: Stem::from_index(index),
            branch: Branch::from_index(index),
        }
    }

    /// 해당 연도의 간지. `(year - 1984) mod 60`
    pub fn for_year(year: i32) -> Self {
        Self::from_cycle_index((year - CYCLE_EPOCH_YEAR).rem_euclid(60) as usize)
    }

    /// 60갑자 순번.
    pub fn cycle_index(self) -> usize {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(60) as usize
    }

    /// 순번 기준으로 `delta`만큼 이동합니다. 천간·지지가 각각 한 칸씩 움직입니다.
    pub fn step(self, delta: i64) -> Self {
        Self::from_cycle_index((self.cycle_index() as i64 + delta).rem_euclid(60) as usize)
    }

    /// 천간.
    pub fn stem(self) -> Stem {
        self.stem
    }

    /// 지지.
    pub fn branch(self) -> Branch {
        self.branch
    }

    /// 천간과 지지의 오행.
    pub fn elements(self) -> [Element; 2] {
        [self.stem.element(), self.branch.element()]
    }
}

impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for GanZhi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(g), Some(z), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("간지는 두 글자여야 합니다: {}", s));
        };
        let stem = Stem::from_label(g.encode_utf8(&mut [0; 4]))
            .ok_or_else(|| format!("알 수 없는 천간: {}", g))?;
        let branch = Branch::from_label(z.encode_utf8(&mut [0; 4]))
            .ok_or_else(|| format!("알 수 없는 지지: {}", z))?;
        GanZhi::new(stem, branch).ok_or_else(|| format!("음양이 맞지 않는 간지: {}", s))
    }
}

impl Serialize for GanZhi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GanZhi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
