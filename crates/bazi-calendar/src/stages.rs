//! 십이운성, 납음, 공망.

use bazi_core::{Branch, GanZhi, Stem};

/// 십이운성(十二长生) 순서.
const TWELVE_STAGES: [&str; 12] = [
    "长生", "沐浴", "冠带", "临官", "帝旺", "衰", "病", "死", "墓", "绝", "胎", "养",
];

/// 육십갑자 두 개씩의 납음(纳音).
const NA_YIN: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火",
    "涧下水", "城头土", "白蜡金", "杨柳木", "泉中水", "屋上土",
    "霹雳火", "松柏木", "长流水", "沙中金", "山下火", "平地木",
    "壁上土", "金箔金", "覆灯火", "天河水", "大驿土", "钗钏金",
    "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

/// 천간별 长生 지지.
fn growth_origin(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Branch::Hai,
        Stem::Yi => Branch::Wu,
        Stem::Bing | Stem::Wu => Branch::Yin,
        Stem::Ding | Stem::Ji => Branch::You,
        Stem::Geng => Branch::Si,
        Stem::Xin => Branch::Zi,
        Stem::Ren => Branch::Shen,
        Stem::Gui => Branch::Mao,
    }
}

/// 천간이 지지에서 갖는 십이운성. 양간은 순행, 음간은 역행합니다.
pub fn twelve_stage(stem: Stem, branch: Branch) -> &'static str {
    let origin = growth_origin(stem).index();
    let b = branch.index();
    let offset = if stem.is_yang() {
        (b + 12 - origin) % 12
    } else {
        (origin + 12 - b) % 12
    };
    TWELVE_STAGES[offset]
}

/// 납음.
pub fn na_yin(gz: GanZhi) -> &'static str {
    NA_YIN[gz.cycle_index() / 2]
}

/// 순중공망(旬空) 두 지지 라벨. 예: 甲子旬 → `戌亥`
pub fn void_pair(gz: GanZhi) -> String {
    let head = (gz.branch().index() + 12 - gz.stem().index()) % 12;
    format!(
        "{}{}",
        Branch::from_index(head + 10),
        Branch::from_index(head + 11)
    )
}
