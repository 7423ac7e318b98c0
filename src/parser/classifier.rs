use crate::models::ElementType;
use crate::utils::{is_all_caps, is_transition_line, ScreenplayConstants, LINE_REGEX};

/// 一行及其上下相邻行
///
/// 识别只看这个窗口，越界的相邻行视为不存在。
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub previous: Option<&'a str>,
    pub current: &'a str,
    pub next: Option<&'a str>,
}

impl<'a> ClassifyContext<'a> {
    pub fn new<S: AsRef<str>>(line: &'a str, all_lines: &'a [S], index: usize) -> Self {
        let previous = index
            .checked_sub(1)
            .and_then(|i| all_lines.get(i))
            .map(|s| s.as_ref().trim());
        let next = index
            .checked_add(1)
            .and_then(|i| all_lines.get(i))
            .map(|s| s.as_ref().trim());

        ClassifyContext {
            previous,
            current: line.trim(),
            next,
        }
    }

    /// 按优先级识别，先匹配者胜出
    pub fn classify(&self) -> ElementType {
        let trimmed = self.current;

        if trimmed.is_empty() {
            return ElementType::Action;
        }

        // 场景标题；"CUT TO:" 同时在转场列表里，按转场处理
        if LINE_REGEX["scene_heading"].is_match(trimmed) && !is_transition_line(trimmed) {
            return ElementType::SceneHeading;
        }

        // 角色名：全大写，且下一行存在、非空、不是全大写
        if is_all_caps(trimmed) && trimmed.chars().count() < ScreenplayConstants::CHARACTER_MAX_LEN {
            if let Some(next) = self.next {
                if !next.is_empty() && !is_all_caps(next) {
                    return ElementType::Character;
                }
            }
        }

        if LINE_REGEX["parenthetical"].is_match(trimmed) {
            return ElementType::Parenthetical;
        }

        if is_transition_line(trimmed) {
            return ElementType::Transition;
        }

        // 紧跟角色名之后的是对白
        if let Some(previous) = self.previous {
            if !previous.is_empty() && is_all_caps(previous) {
                return ElementType::Dialogue;
            }
        }

        if LINE_REGEX["shot"].is_match(trimmed) {
            return ElementType::Shot;
        }

        ElementType::Action
    }
}

/// 识别单行的元素类型
///
/// * `line` - 要识别的行（内部会去掉首尾空白）
/// * `all_lines` - 整个文档的行，用于查看相邻行
/// * `index` - 该行在 `all_lines` 中的位置（从 0 开始）
///
/// 永不失败，无法识别时返回 `Action`。
pub fn classify<S: AsRef<str>>(line: &str, all_lines: &[S], index: usize) -> ElementType {
    ClassifyContext::new(line, all_lines, index).classify()
}

/// 一次遍历识别所有行
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ElementType> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| classify(line.as_ref(), lines, i))
        .collect()
}

/// 识别整段文本
pub fn classify_text(text: &str) -> Vec<ElementType> {
    let lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    classify_lines(&lines)
}
