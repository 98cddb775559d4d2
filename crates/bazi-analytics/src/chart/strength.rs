//! 일간 강약 평가와 희용신/기신 도출.
//!
//! # 점수 (최대 5점)
//!
//! 1. 월령: 월지 계절 오행 == 일간 오행 → +2
//! 2. 통근: 네 기둥 지장간 중 일간 오행이 하나라도 있으면 → +2
//! 3. 득생: 월지 계절 오행이 일간을 생하거나 같으면 → +1
//!
//! 4점 이상 强, 2점 이상 中, 그 외 弱.

use bazi_core::{Branch, Element, FourPillars, Stem, Strength};

/// 强 판정 하한.
const STRONG_THRESHOLD: u8 = 4;
/// 中 판정 하한.
const MEDIUM_THRESHOLD: u8 = 2;

/// 강약 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthEvaluation {
    pub score: u8,
    pub strength: Strength,
    pub favorable: Vec<Element>,
    pub unfavorable: Vec<Element>,
}

/// 강약 평가기.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthEvaluator;

impl StrengthEvaluator {
    /// 새 평가기.
    pub fn new() -> Self {
        Self
    }

    /// 네 기둥을 평가합니다.
    pub fn evaluate(&self, pillars: &FourPillars) -> StrengthEvaluation {
        let day = pillars.day_master.element;
        let hidden = pillars.iter().flat_map(|p| p.hidden_stems.iter().copied());
        let score = Self::score(day, pillars.month.branch, hidden);
        let strength = Self::classify(score);
        let (favorable, unfavorable) = Self::favorable_elements(day, strength);
        StrengthEvaluation {
            score,
            strength,
            favorable,
            unfavorable,
        }
    }

    /// 강약 점수.
    pub fn score(
        day: Element,
        month_branch: Option<Branch>,
        hidden: impl IntoIterator<Item = Stem>,
    ) -> u8 {
        let season = month_branch.map(Branch::element);
        let mut score = 0;
        if season == Some(day) {
            score += 2;
        }
        if hidden.into_iter().any(|s| s.element() == day) {
            score += 2;
        }
        if matches!(season, Some(s) if s == day.generated_by() || s == day) {
            score += 1;
        }
        score
    }

    /// 점수 → 강약.
    pub fn classify(score: u8) -> Strength {
        if score >= STRONG_THRESHOLD {
            Strength::Strong
        } else if score >= MEDIUM_THRESHOLD {
            Strength::Medium
        } else {
            Strength::Weak
        }
    }

    /// 희용 오행과 기피 오행.
    ///
    /// - 强: 설기(내가 생하는 것)·재성(내가 극하는 것)을 쓰고, 비겁·인성을 꺼림
    /// - 弱: 비겁·인성을 쓰고, 식상·관살을 꺼림
    /// - 中: 비겁·식상을 쓰고, 관살을 꺼림
    pub fn favorable_elements(day: Element, strength: Strength) -> (Vec<Element>, Vec<Element>) {
        match strength {
            Strength::Strong => (
                vec![day.generates(), day.restrains()],
                vec![day, day.generated_by()],
            ),
            Strength::Weak => (
                vec![day, day.generated_by()],
                vec![day.generates(), day.restrained_by()],
            ),
            Strength::Medium => (vec![day, day.generates()], vec![day.restrained_by()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(StrengthEvaluator::classify(5), Strength::Strong);
        assert_eq!(StrengthEvaluator::classify(4), Strength::Strong);
        assert_eq!(StrengthEvaluator::classify(3), Strength::Medium);
        assert_eq!(StrengthEvaluator::classify(2), Strength::Medium);
        assert_eq!(StrengthEvaluator::classify(1), Strength::Weak);
        assert_eq!(StrengthEvaluator::classify(0), Strength::Weak);
    }

    #[test]
    fn test_score_components() {
        // 甲木 일간, 寅월(木), 지장간에 甲 → 2 + 2 + 1
        let s = StrengthEvaluator::score(Element::Wood, Some(Branch::Yin), [Stem::Jia]);
        assert_eq!(s, 5);
        // 亥월(水)은 木을 생함 → +1, 통근 없음
        let s = StrengthEvaluator::score(Element::Wood, Some(Branch::Hai), [Stem::Geng]);
        assert_eq!(s, 1);
        // 申월(金), 통근 있음 → 2
        let s = StrengthEvaluator::score(Element::Wood, Some(Branch::Shen), [Stem::Yi]);
        assert_eq!(s, 2);
        // 월지 없음
        let s = StrengthEvaluator::score(Element::Wood, None, []);
        assert_eq!(s, 0);
    }

    #[test]
    fn test_favorable_mapping_for_wood() {
        let (fav, unfav) = StrengthEvaluator::favorable_elements(Element::Wood, Strength::Strong);
        assert_eq!(fav, vec![Element::Fire, Element::Earth]);
        assert_eq!(unfav, vec![Element::Wood, Element::Water]);

        let (fav, unfav) = StrengthEvaluator::favorable_elements(Element::Wood, Strength::Weak);
        assert_eq!(fav, vec![Element::Wood, Element::Water]);
        assert_eq!(unfav, vec![Element::Fire, Element::Metal]);

        let (fav, unfav) = StrengthEvaluator::favorable_elements(Element::Wood, Strength::Medium);
        assert_eq!(fav, vec![Element::Wood, Element::Fire]);
        assert_eq!(unfav, vec![Element::Metal]);
    }

    #[test]
    fn test_favorable_and_unfavorable_never_overlap() {
        for day in Element::ALL {
            for strength in [Strength::Strong, Strength::Medium, Strength::Weak] {
                let (fav, unfav) = StrengthEvaluator::favorable_elements(day, strength);
                assert!(fav.iter().all(|e| !unfav.contains(e)), "{day} {strength}");
            }
        }
    }
}
