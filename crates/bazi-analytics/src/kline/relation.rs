//! 희기 관계 점수와 지지 합충 팩터.
//!
//! # 관계 점수 (간지 한 쌍의 오행 두 개 기준)
//!
//! | 희용 적중 | 기신 적중 | 점수 | 라벨 |
//! |-----------|-----------|------|------|
//! | ≥2        | -         | 85   | 喜   |
//! | -         | ≥2        | 35   | 忌   |
//! | 1         | 0         | 75   | 喜   |
//! | 0         | 1         | 50   | 忌   |
//! | 그 외     |           | 65   | 中性 |
//!
//! # 합충 팩터
//!
//! 원국×유년, 원국×대운, 대운×유년 지지 쌍을 모두 셉니다.
//! 충 ≥2 → (35, -15), 충 1 → (50, -10), 합 ≥2 → (70, +5), 합 1 → (65, +5), 없음 → (60, 0).

use std::collections::HashMap;

use bazi_core::{Branch, Element, GanZhi, RelationTag, Strength};

// =============================================================================
// 관계 점수
// =============================================================================

/// 희기 관계 라벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationLabel {
    Favorable,
    Neutral,
    Unfavorable,
}

/// 관계 점수.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationScore {
    pub label: RelationLabel,
    pub score: u32,
}

impl RelationScore {
    /// 희용 관계인지.
    pub fn is_favorable(&self) -> bool {
        self.label == RelationLabel::Favorable
    }

    /// 관계가 없는 중립 점수.
    pub const NEUTRAL: RelationScore = RelationScore {
        label: RelationLabel::Neutral,
        score: 65,
    };
}

/// 오행 목록의 희기 점수.
pub fn relation_score(
    favorable: &[Element],
    unfavorable: &[Element],
    elements: impl IntoIterator<Item = Element>,
) -> RelationScore {
    let (mut fav, mut unfav) = (0u32, 0u32);
    for e in elements {
        if favorable.contains(&e) {
            fav += 1;
        }
        if unfavorable.contains(&e) {
            unfav += 1;
        }
    }

    let (label, score) = match (fav, unfav) {
        (f, _) if f >= 2 => (RelationLabel::Favorable, 85),
        (_, u) if u >= 2 => (RelationLabel::Unfavorable, 35),
        (1, 0) => (RelationLabel::Favorable, 75),
        (0, 1) => (RelationLabel::Unfavorable, 50),
        _ => return RelationScore::NEUTRAL,
    };
    RelationScore { label, score }
}

/// 간지 한 쌍의 희기 점수.
pub fn ganzhi_relation(
    favorable: &[Element],
    unfavorable: &[Element],
    gz: GanZhi,
) -> RelationScore {
    relation_score(favorable, unfavorable, gz.elements())
}

// =============================================================================
// 합충 팩터
// =============================================================================

/// 합충 팩터 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClashFactor {
    pub score: u32,
    /// 변동성 계산용 가감
    pub delta: i32,
    pub combinations: u32,
    pub clashes: u32,
}

impl ClashFactor {
    /// 합 → 충 순서의 태그.
    pub fn tags(&self) -> Vec<RelationTag> {
        let mut tags = Vec::with_capacity(2);
        if self.combinations > 0 {
            tags.push(RelationTag::Combination);
        }
        if self.clashes > 0 {
            tags.push(RelationTag::Clash);
        }
        tags
    }
}

/// 원국·대운·유년 지지 사이의 합충을 셉니다.
pub fn clash_factor(natal: &[Branch], luck: Option<Branch>, year: Branch) -> ClashFactor {
    let mut pairs: Vec<(Branch, Branch)> = natal.iter().map(|&n| (n, year)).collect();
    if let Some(l) = luck {
        pairs.extend(natal.iter().map(|&n| (n, l)));
        pairs.push((l, year));
    }

    let combinations = pairs.iter().filter(|(a, b)| a.combines(*b)).count() as u32;
    let clashes = pairs.iter().filter(|(a, b)| a.clashes(*b)).count() as u32;

    let (score, delta) = if clashes >= 2 {
        (35, -15)
    } else if clashes == 1 {
        (50, -10)
    } else if combinations >= 2 {
        (70, 5)
    } else if combinations == 1 {
        (65, 5)
    } else {
        (60, 0)
    };

    ClashFactor {
        score,
        delta,
        combinations,
        clashes,
    }
}

// =============================================================================
// 원국 점수
// =============================================================================

/// 원국 오행 분포 점수.
///
/// 나타난 오행의 개수 차이가 1 이하 → 65, 한 오행이 5개 이상 → 50, 그 외 60.
pub fn pattern_adjustment(elements: impl IntoIterator<Item = Element>) -> u32 {
    let mut counts: HashMap<Element, u32> = HashMap::new();
    for e in elements {
        *counts.entry(e).or_insert(0) += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);
    let min = counts.values().copied().min().unwrap_or(0);

    if max - min <= 1 {
        65
    } else if max >= 5 {
        50
    } else {
        60
    }
}

/// 강약 기준 점수: 强 80, 中 70, 弱 58.
pub fn base_score(strength: Strength) -> u32 {
    match strength {
        Strength::Strong => 80,
        Strength::Medium => 70,
        Strength::Weak => 58,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Element::*;

    #[test]
    fn test_relation_score_table() {
        let fav = [Fire, Earth];
        let unfav = [Wood, Water];
        assert_eq!(relation_score(&fav, &unfav, [Fire, Earth]).score, 85);
        assert_eq!(relation_score(&fav, &unfav, [Wood, Water]).score, 35);
        assert_eq!(relation_score(&fav, &unfav, [Fire, Metal]).score, 75);
        assert_eq!(relation_score(&fav, &unfav, [Water, Metal]).score, 50);
        assert_eq!(relation_score(&fav, &unfav, [Fire, Water]), RelationScore::NEUTRAL);
        assert_eq!(relation_score(&fav, &unfav, [Metal, Metal]), RelationScore::NEUTRAL);
    }

    #[test]
    fn test_ganzhi_relation_uses_both_elements() {
        // 丙午 = 火火
        let r = ganzhi_relation(&[Fire], &[Water], "丙午".parse().unwrap());
        assert_eq!(r.score, 85);
        assert!(r.is_favorable());
    }

    #[test]
    fn test_clash_factor_counts_all_pairs() {
        use Branch::*;
        // 원국 子 vs 유년 午 → 충 1
        let f = clash_factor(&[Zi, Yin], None, Wu);
        assert_eq!((f.score, f.delta, f.clashes), (50, -10, 1));
        assert_eq!(f.tags(), vec![RelationTag::Clash]);

        // 대운 午가 원국 子를 충 + 유년 午도 子를 충 → 2
        let f = clash_factor(&[Zi], Some(Wu), Wu);
        assert_eq!((f.score, f.delta), (35, -15));

        // 子丑 합 (원국×유년)만 해당 → 합 1
        let f = clash_factor(&[Zi], Some(Chen), Chou);
        assert_eq!((f.score, f.delta, f.combinations), (65, 5, 1));
        assert_eq!(f.tags(), vec![RelationTag::Combination]);

        let f = clash_factor(&[Mao], Some(Xu), Xu);
        assert_eq!((f.score, f.combinations), (70, 2));

        let f = clash_factor(&[Zi], Some(Zi), Zi);
        assert_eq!((f.score, f.delta), (60, 0));
        assert!(f.tags().is_empty());
    }

    #[test]
    fn test_pattern_adjustment() {
        assert_eq!(pattern_adjustment([Wood, Fire, Earth, Metal, Water, Wood, Fire, Earth]), 65);
        assert_eq!(pattern_adjustment([Wood, Wood, Wood, Wood, Wood, Fire, Earth, Metal]), 50);
        assert_eq!(pattern_adjustment([Wood, Wood, Wood, Fire, Earth, Earth, Metal, Water]), 60);
        // 두 오행만 고르게 나타나면 65
        assert_eq!(pattern_adjustment([Wood, Wood, Wood, Wood, Fire, Fire, Fire, Fire]), 65);
    }

    #[test]
    fn test_base_score() {
        assert_eq!(base_score(Strength::Strong), 80);
        assert_eq!(base_score(Strength::Medium), 70);
        assert_eq!(base_score(Strength::Weak), 58);
    }
}
