//! 출생 입력 읽기.
//!
//! `--input` JSON 파일이 있으면 그대로 쓰고, 없으면 개별 플래그로 조립합니다.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use std::fs;

use bazi_core::{
    BirthDate, BirthInput, BirthLocation, BirthTime, CalendarType, Gender, TimeSegment,
};

/// 출생 입력 인자.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// 출생 입력 JSON 파일 (지정하면 나머지 플래그는 무시)
    #[arg(short, long)]
    pub input: Option<String>,

    /// 이름
    #[arg(long, default_value = "匿名")]
    pub name: String,

    /// 성별 (male, female)
    #[arg(short, long, default_value = "male")]
    pub gender: String,

    /// 달력 (solar, lunar)
    #[arg(short, long, default_value = "solar")]
    pub calendar: String,

    /// 출생 날짜 (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// 음력 윤달 여부
    #[arg(long, default_value = "false")]
    pub leap: bool,

    /// 출생 시각 (HH:MM)
    #[arg(short, long, conflicts_with = "segment")]
    pub time: Option<String>,

    /// 출생 시간대 (예: 子时, 上午)
    #[arg(short, long)]
    pub segment: Option<String>,

    /// 성/직할시
    #[arg(long, default_value = "北京")]
    pub province: String,

    /// 도시
    #[arg(long, default_value = "北京")]
    pub city: String,

    /// 동경 (도)
    #[arg(long, default_value = "116.46")]
    pub longitude: f64,
}

impl InputArgs {
    /// 출생 입력을 만듭니다. 검증은 엔진이 수행합니다.
    pub fn resolve(&self) -> Result<BirthInput> {
        if let Some(path) = &self.input {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("입력 파일을 읽을 수 없습니다: {}", path))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("입력 JSON 형식 오류: {}", path));
        }

        let date = self
            .date
            .as_deref()
            .ok_or_else(|| anyhow!("--date 또는 --input이 필요합니다"))?;
        let (year, month, day) = parse_date(date)?;

        let time = match (&self.time, &self.segment) {
            (Some(t), _) => {
                let (hour, minute) = parse_time(t)?;
                BirthTime::Exact { hour, minute }
            }
            (None, Some(label)) => BirthTime::Segment {
                label: TimeSegment::from_label(label)
                    .ok_or_else(|| anyhow!("알 수 없는 시간대: {} (`bazi segments` 참고)", label))?,
            },
            (None, None) => bail!("--time 또는 --segment가 필요합니다"),
        };

        Ok(BirthInput {
            name: self.name.clone(),
            gender: parse_gender(&self.gender)?,
            calendar: parse_calendar(&self.calendar)?,
            date: BirthDate {
                year,
                month,
                day,
                is_leap_month: self.leap.then_some(true),
            },
            time,
            location: BirthLocation {
                province: self.province.clone(),
                city: self.city.clone(),
                longitude: self.longitude,
            },
        })
    }
}

/// `YYYY-MM-DD` → (년, 월, 일). 달력 존재 여부는 검사하지 않습니다.
pub fn parse_date(s: &str) -> Result<(i32, i32, i32)> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        bail!("Invalid date format: {}. Use YYYY-MM-DD", s);
    };
    let num = |v: &str| {
        v.parse::<i32>()
            .map_err(|_| anyhow!("Invalid date format: {}. Use YYYY-MM-DD", s))
    };
    Ok((num(*y)?, num(*m)?, num(*d)?))
}

/// `HH:MM` → (시, 분).
pub fn parse_time(s: &str) -> Result<(i32, i32)> {
    let (h, m) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid time format: {}. Use HH:MM", s))?;
    let num = |v: &str| {
        v.parse::<i32>()
            .map_err(|_| anyhow!("Invalid time format: {}. Use HH:MM", s))
    };
    Ok((num(h)?, num(m)?))
}

fn parse_gender(s: &str) -> Result<Gender> {
    match s.to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        _ => Err(anyhow!("Invalid gender: {}. Use: male, female", s)),
    }
}

fn parse_calendar(s: &str) -> Result<CalendarType> {
    match s.to_lowercase().as_str() {
        "solar" => Ok(CalendarType::Solar),
        "lunar" => Ok(CalendarType::Lunar),
        _ => Err(anyhow!("Invalid calendar: {}. Use: solar, lunar", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> InputArgs {
        InputArgs {
            input: None,
            name: "测试".to_string(),
            gender: "female".to_string(),
            calendar: "lunar".to_string(),
            date: Some("2023-02-10".to_string()),
            leap: true,
            time: None,
            segment: Some("午时".to_string()),
            province: "上海".to_string(),
            city: "上海".to_string(),
            longitude: 121.47,
        }
    }

    #[test]
    fn test_parse_date_keeps_nonexistent_days() {
        assert_eq!(parse_date("1990-02-30").unwrap(), (1990, 2, 30));
        assert!(parse_date("1990/02/03").is_err());
        assert!(parse_date("1990-02").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("07:05").unwrap(), (7, 5));
        assert!(parse_time("0705").is_err());
    }

    #[test]
    fn test_resolve_from_flags() {
        let input = args().resolve().unwrap();
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.calendar, CalendarType::Lunar);
        assert!(input.is_leap_month());
        assert_eq!(input.time, BirthTime::Segment { label: TimeSegment::Wu });
        assert!(input.ensure_valid().is_ok());
    }

    #[test]
    fn test_resolve_requires_time() {
        let mut a = args();
        a.segment = None;
        assert!(a.resolve().is_err());

        let mut a = args();
        a.segment = Some("午".to_string());
        assert!(a.resolve().is_err());
    }
}
