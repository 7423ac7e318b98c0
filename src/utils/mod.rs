pub mod screenplay_constants;

pub use screenplay_constants::{ScreenplayConstants, LINE_REGEX, SCENE_REGEX};

/// 检查一行文本是否全为大写
///
/// 只允许大写字母、空白和撇号，且至少两个字符（先去掉首尾空白）。
pub fn is_all_caps(text: &str) -> bool {
    LINE_REGEX["all_caps"].is_match(text.trim())
}

/// 检查一行文本是否为空行
pub fn is_blank_line(text: &str) -> bool {
    text.trim().is_empty()
}

/// 检查是否为转场关键字开头（不区分大小写）
pub fn is_transition_line(text: &str) -> bool {
    LINE_REGEX["transition"].is_match(text.trim())
}

/// 去掉行首的场景编号 `N.`
pub fn strip_scene_number(text: &str) -> &str {
    match SCENE_REGEX["number_prefix"].find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}
