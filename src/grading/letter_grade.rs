use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LmsError;

/// 字母成绩
///
/// `Ungraded` 对应存储中的 `"--"`，表示尚无可计算的成绩。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "--")]
    Ungraded,
}

// (下界, 成绩)，按下界从高到低排列，下界本身归入该档
const CUTOFFS: [(f64, LetterGrade); 11] = [
    (93.0, LetterGrade::A),
    (90.0, LetterGrade::AMinus),
    (87.0, LetterGrade::BPlus),
    (83.0, LetterGrade::B),
    (80.0, LetterGrade::BMinus),
    (77.0, LetterGrade::CPlus),
    (73.0, LetterGrade::C),
    (70.0, LetterGrade::CMinus),
    (67.0, LetterGrade::DPlus),
    (63.0, LetterGrade::D),
    (60.0, LetterGrade::DMinus),
];

impl LetterGrade {
    pub const UNGRADED: &'static str = "--";

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::E => "E",
            LetterGrade::Ungraded => Self::UNGRADED,
        }
    }

    /// 百分比映射为字母成绩，NaN 得到 `Ungraded`
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return LetterGrade::Ungraded;
        }
        CUTOFFS
            .iter()
            .find(|(lower, _)| percent >= *lower)
            .map(|(_, grade)| *grade)
            .unwrap_or(LetterGrade::E)
    }

    /// 绩点；`Ungraded` 不参与 GPA，调用方需先过滤
    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::AMinus => 3.7,
            LetterGrade::BPlus => 3.3,
            LetterGrade::B => 3.0,
            LetterGrade::BMinus => 2.7,
            LetterGrade::CPlus => 2.3,
            LetterGrade::C => 2.0,
            LetterGrade::CMinus => 1.7,
            LetterGrade::DPlus => 1.3,
            LetterGrade::D => 1.0,
            LetterGrade::DMinus => 0.7,
            LetterGrade::E | LetterGrade::Ungraded => 0.0,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = LmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(LetterGrade::A),
            "A-" => Ok(LetterGrade::AMinus),
            "B+" => Ok(LetterGrade::BPlus),
            "B" => Ok(LetterGrade::B),
            "B-" => Ok(LetterGrade::BMinus),
            "C+" => Ok(LetterGrade::CPlus),
            "C" => Ok(LetterGrade::C),
            "C-" => Ok(LetterGrade::CMinus),
            "D+" => Ok(LetterGrade::DPlus),
            "D" => Ok(LetterGrade::D),
            "D-" => Ok(LetterGrade::DMinus),
            "E" => Ok(LetterGrade::E),
            "--" => Ok(LetterGrade::Ungraded),
            other => Err(LmsError::validation(format!(
                "Unknown letter grade: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoffs_select_upper_bucket() {
        let expected = [
            (60.0, "D-"),
            (63.0, "D"),
            (67.0, "D+"),
            (70.0, "C-"),
            (73.0, "C"),
            (77.0, "C+"),
            (80.0, "B-"),
            (83.0, "B"),
            (87.0, "B+"),
            (90.0, "A-"),
            (93.0, "A"),
        ];
        for (percent, letter) in expected {
            assert_eq!(LetterGrade::from_percent(percent).as_str(), letter);
        }
    }

    #[test]
    fn test_just_below_cutoff() {
        assert_eq!(LetterGrade::from_percent(92.999), LetterGrade::AMinus);
        assert_eq!(LetterGrade::from_percent(59.999), LetterGrade::E);
        assert_eq!(LetterGrade::from_percent(0.0), LetterGrade::E);
        assert_eq!(LetterGrade::from_percent(120.0), LetterGrade::A);
    }

    #[test]
    fn test_nan_is_ungraded() {
        assert_eq!(LetterGrade::from_percent(f64::NAN), LetterGrade::Ungraded);
        assert_eq!(LetterGrade::from_percent(f64::INFINITY), LetterGrade::A);
    }

    #[test]
    fn test_parse_and_display() {
        for grade in ["A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "D-", "E", "--"] {
            let parsed: LetterGrade = grade.parse().unwrap();
            assert_eq!(parsed.to_string(), grade);
        }
        assert!("F".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_serde_uses_letter_strings() {
        let json = serde_json::to_string(&LetterGrade::BPlus).unwrap();
        assert_eq!(json, "\"B+\"");
        let grade: LetterGrade = serde_json::from_str("\"--\"").unwrap();
        assert_eq!(grade, LetterGrade::Ungraded);
    }
}
