use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ClassKey;

static SUBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,4}$").expect("Invalid subject regex"));

static SEASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Spring|Summer|Fall|Winter)$").expect("Invalid season regex"));

static UID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^u\d{7}$").expect("Invalid uid regex"));

pub fn validate_subject(subject: &str) -> Result<(), &'static str> {
    // 院系代码：1 到 4 个字母
    if !SUBJECT_RE.is_match(subject) {
        return Err("Subject must be 1 to 4 letters");
    }
    Ok(())
}

pub fn validate_course_number(number: i32) -> Result<(), &'static str> {
    if !(0..=9999).contains(&number) {
        return Err("Course number must be between 0 and 9999");
    }
    Ok(())
}

pub fn validate_season(season: &str) -> Result<(), &'static str> {
    if !SEASON_RE.is_match(season) {
        return Err("Season must be one of Spring, Summer, Fall, Winter");
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(1000..=9999).contains(&year) {
        return Err("Year must be a four digit number");
    }
    Ok(())
}

pub fn validate_uid(uid: &str) -> Result<(), &'static str> {
    // uid 格式：u + 7 位数字
    if !UID_RE.is_match(uid) {
        return Err("uid must be 'u' followed by 7 digits");
    }
    Ok(())
}

/// 名称按原样存储和查找，因此不允许首尾空白
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.len() != name.len() {
        return Err("Name must not start or end with whitespace");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// 校验开课业务键的四个字段
pub fn validate_class_key(key: &ClassKey) -> Result<(), &'static str> {
    validate_subject(&key.subject)?;
    validate_course_number(key.num)?;
    validate_season(&key.season)?;
    validate_year(key.year)
}

/// 解析当天时间，接受 `HH:MM:SS` 和 `HH:MM`
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}
