use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

pub struct ScreenplayConstants;

impl ScreenplayConstants {
    // 转场关键字
    pub fn transition_keywords() -> &'static [&'static str] {
        &["CUT TO:", "FADE TO:", "DISSOLVE TO:", "SMASH CUT TO:"]
    }

    // 镜头关键字
    pub fn shot_keywords() -> &'static [&'static str] {
        &["CLOSE UP", "WIDE SHOT", "MEDIUM SHOT", "POV", "INSERT", "ECU", "EWS", "ANGLE ON"]
    }

    // 角色名最大长度（不含）
    pub const CHARACTER_MAX_LEN: usize = 50;

    // 等宽排版时每字符像素宽
    pub const PIXELS_PER_CHAR: f32 = 12.0;
}

// 由关键字表拼出不区分大小写的行首匹配
fn keyword_pattern(keywords: &[&str], suffix: &str) -> String {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    format!(r"(?i)^({}){}", alternatives.join("|"), suffix)
}

lazy_static! {
    // 行级元素正则
    pub static ref LINE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("scene_heading", Regex::new(r"(?i)^(\d+\.\s+)?(INT\.|EXT\.|FADE IN:|FADE OUT\.|CUT TO:)").unwrap());
        map.insert("slugline", Regex::new(r"(?i)^(INT\.|EXT\.)").unwrap());
        map.insert("all_caps", Regex::new(r"^[A-Z\s']{2,}$").unwrap());
        map.insert("parenthetical", Regex::new(r"^\([^)]+\)$").unwrap());
        map.insert("transition", Regex::new(&keyword_pattern(ScreenplayConstants::transition_keywords(), "")).unwrap());
        map.insert("shot", Regex::new(&keyword_pattern(ScreenplayConstants::shot_keywords(), r"\b")).unwrap());
        map
    };

    // 场景编号相关正则
    pub static ref SCENE_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        map.insert("numbered", Regex::new(r"^\d+\.").unwrap());
        map.insert("number_prefix", Regex::new(r"^\d+\.\s*").unwrap());
        map.insert("number_prefix_spaced", Regex::new(r"^(\s*)\d+\. ").unwrap());
        map.insert("location", Regex::new(r"(?i)^(INT\.|EXT\.)\s+(.+?)\s*-\s*(.+)$").unwrap());
        map.insert("slug_prefix", Regex::new(r"(?i)^(INT\.|EXT\.)\s*").unwrap());
        map
    };
}
