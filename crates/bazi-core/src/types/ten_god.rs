//! 십신(十神).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Stem;

/// 일간 본인을 가리키는 라벨.
pub const DAY_MASTER_LABEL: &str = "日主";

/// 십신.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenGod {
    #[serde(rename = "比肩")]
    Companion,
    #[serde(rename = "劫财")]
    RobWealth,
    #[serde(rename = "食神")]
    EatingGod,
    #[serde(rename = "伤官")]
    HurtingOfficer,
    #[serde(rename = "偏财")]
    IndirectWealth,
    #[serde(rename = "正财")]
    DirectWealth,
    #[serde(rename = "七杀")]
    SevenKillings,
    #[serde(rename = "正官")]
    DirectOfficer,
    #[serde(rename = "偏印")]
    IndirectResource,
    #[serde(rename = "正印")]
    DirectResource,
}

impl TenGod {
    /// 전체 십신.
    pub const ALL: [TenGod; 10] = [
        TenGod::Companion,
        TenGod::RobWealth,
        TenGod::EatingGod,
        TenGod::HurtingOfficer,
        TenGod::IndirectWealth,
        TenGod::DirectWealth,
        TenGod::SevenKillings,
        TenGod::DirectOfficer,
        TenGod::IndirectResource,
        TenGod::DirectResource,
    ];

    /// 일간 기준으로 다른 천간의 십신을 구합니다.
    ///
    /// 오행 관계로 군을 고르고, 음양이 같으면 편(偏), 다르면 정(正)입니다.
    pub fn between(day_master: Stem, other: Stem) -> Self {
        let dm = day_master.element();
        let el = other.element();
        let same_polarity = day_master.is_yang() == other.is_yang();
        let (same, diff) = if el == dm {
            (TenGod::Companion, TenGod::RobWealth)
        } else if dm.generates() == el {
            (TenGod::EatingGod, TenGod::HurtingOfficer)
        } else if dm.restrains() == el {
            (TenGod::IndirectWealth, TenGod::DirectWealth)
        } else if el.restrains() == dm {
            (TenGod::SevenKillings, TenGod::DirectOfficer)
        } else {
            (TenGod::IndirectResource, TenGod::DirectResource)
        };
        if same_polarity {
            same
        } else {
            diff
        }
    }

    /// 한자 표기.
    pub fn label(self) -> &'static str {
        match self {
            TenGod::Companion => "比肩",
            TenGod::RobWealth => "劫财",
            TenGod::EatingGod => "食神",
            TenGod::HurtingOfficer => "伤官",
            TenGod::IndirectWealth => "偏财",
            TenGod::DirectWealth => "正财",
            TenGod::SevenKillings => "七杀",
            TenGod::DirectOfficer => "正官",
            TenGod::IndirectResource => "偏印",
            TenGod::DirectResource => "正印",
        }
    }

    /// 한자 표기에서 파싱합니다. `日主`는 십신이 아니므로 `None`.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == s)
    }
}

impl fmt::Display for TenGod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
