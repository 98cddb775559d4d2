//! 인생 K선 결과 모델.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::GanZhi;

/// 연도별 캔들 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// 연도 관계 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationTag {
    /// 지지 육합
    #[serde(rename = "合")]
    Combination,
    /// 지지 육충
    #[serde(rename = "冲")]
    Clash,
    /// 유년 지지가 일지를 충
    #[serde(rename = "冲日支")]
    DayBranchClash,
    /// 유년 간지와 대운 간지가 같음
    #[serde(rename = "岁运并临")]
    LuckYearCoincide,
}

impl RelationTag {
    /// 한자 라벨.
    pub fn label(self) -> &'static str {
        match self {
            RelationTag::Combination => "合",
            RelationTag::Clash => "冲",
            RelationTag::DayBranchClash => "冲日支",
            RelationTag::LuckYearCoincide => "岁运并临",
        }
    }
}

impl fmt::Display for RelationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 한 해(가세 나이 1개)의 캔들.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearKLine {
    pub age: u32,
    pub year: i32,
    pub stem_branch: GanZhi,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// 종가와 같음
    pub score: f64,
    pub trend: Trend,
    pub tags: Vec<RelationTag>,
    /// `上行` / `回撤`
    pub brief: String,
}

impl YearKLine {
    /// 태그 포함 여부.
    pub fn has_tag(&self, tag: RelationTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// 대운 단계 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageLevel {
    #[serde(rename = "偏强")]
    Strong,
    #[serde(rename = "平稳")]
    Steady,
    #[serde(rename = "偏弱")]
    Weak,
}

impl StageLevel {
    /// 점수 구간: 75 이상 偏强, 60 이상 平稳, 그 외 偏弱.
    pub fn from_score(score: u32) -> Self {
        if score >= 75 {
            StageLevel::Strong
        } else if score >= 60 {
            StageLevel::Steady
        } else {
            StageLevel::Weak
        }
    }

    /// 한자 라벨.
    pub fn label(self) -> &'static str {
        match self {
            StageLevel::Strong => "偏强",
            StageLevel::Steady => "平稳",
            StageLevel::Weak => "偏弱",
        }
    }
}

/// 대운 10년 단계 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckStage {
    pub start_age: u32,
    pub end_age: u32,
    pub stem_branch: GanZhi,
    pub score: u32,
    pub level: StageLevel,
    pub summary: String,
    pub advice: String,
    pub risks: Vec<String>,
}

/// 전체 추세 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallTrend {
    #[serde(rename = "前高")]
    EarlyPeak,
    #[serde(rename = "中高")]
    MiddlePeak,
    #[serde(rename = "后高")]
    LatePeak,
    #[serde(rename = "波动")]
    Volatile,
}

/// 고점/저점 연도.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyYear {
    pub age: u32,
    pub year: i32,
    pub score: f64,
    pub stem_branch: GanZhi,
}

impl From<&YearKLine> for KeyYear {
    fn from(k: &YearKLine) -> Self {
        Self {
            age: k.age,
            year: k.year,
            score: k.score,
            stem_branch: k.stem_branch,
        }
    }
}

/// 전체 인사이트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub overall_trend: OverallTrend,
    pub peaks: Vec<KeyYear>,
    pub troughs: Vec<KeyYear>,
    pub ten_god_focus: Vec<String>,
    pub total_score: u32,
    pub summary: String,
}

/// K선 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KLineResult {
    pub years: Vec<YearKLine>,
    pub stages: Vec<LuckStage>,
    pub insight: Insight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_level_thresholds() {
        assert_eq!(StageLevel::from_score(75), StageLevel::Strong);
        assert_eq!(StageLevel::from_score(74), StageLevel::Steady);
        assert_eq!(StageLevel::from_score(60), StageLevel::Steady);
        assert_eq!(StageLevel::from_score(59), StageLevel::Weak);
    }

    #[test]
    fn test_has_tag() {
        let k = YearKLine {
            age: 1,
            year: 1990,
            stem_branch: GanZhi::for_year(1990),
            open: 70.0,
            high: 80.0,
            low: 60.0,
            close: 65.0,
            score: 65.0,
            trend: Trend::Down,
            tags: vec![RelationTag::Clash],
            brief: "回撤".to_string(),
        };
        assert!(k.has_tag(RelationTag::Clash));
        assert!(!k.has_tag(RelationTag::Combination));
    }

    #[test]
    fn test_tag_serde() {
        let tags = vec![RelationTag::Combination, RelationTag::DayBranchClash];
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, "[\"合\",\"冲日支\"]");
    }
}
