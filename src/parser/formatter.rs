use serde::{Deserialize, Serialize};

use crate::models::{
    ElementType, FontWeight, FormattingRule, FormattingRuleTable, Script, TextAlign, TextTransform,
};
use crate::parser::classifier::classify_lines;
use crate::utils::ScreenplayConstants;

/// 结构化界面使用的样式描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    pub font_weight: FontWeight,
    pub font_family: String,
    pub font_size: String,
    pub line_height: f32,
}

impl StyleDescriptor {
    pub fn from_rule(rule: &FormattingRule) -> Self {
        StyleDescriptor {
            margin_left: rule.margin_left,
            margin_right: rule.margin_right,
            margin_top: rule.margin_top,
            margin_bottom: rule.margin_bottom,
            text_align: rule.text_align,
            text_transform: rule.text_transform,
            font_weight: rule.font_weight,
            font_family: "Courier New, monospace".to_string(),
            font_size: "12pt".to_string(),
            line_height: 1.2,
        }
    }

    /// 内联 CSS
    pub fn to_css(&self) -> String {
        format!(
            "margin-left: {}px; margin-right: {}px; margin-top: {}px; margin-bottom: {}px; \
             text-align: {}; text-transform: {}; font-weight: {}; font-family: {}; \
             font-size: {}; line-height: {}",
            self.margin_left,
            self.margin_right,
            self.margin_top,
            self.margin_bottom,
            self.text_align.as_css(),
            self.text_transform.as_css(),
            self.font_weight.as_css(),
            self.font_family,
            self.font_size,
            self.line_height
        )
    }
}

/// 排版后的行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedLine {
    /// 转换后的文本（不含缩进）
    pub text: String,
    pub element_type: ElementType,
    /// 纯文本渲染时的前导空格数
    pub indent: usize,
    pub style: StyleDescriptor,
}

impl FormattedLine {
    /// 等宽纯文本：缩进 + 文本，空行不缩进
    pub fn to_plain_text(&self) -> String {
        if self.text.is_empty() {
            return String::new();
        }
        format!("{}{}", " ".repeat(self.indent), self.text)
    }
}

/// 只做文本转换：去空白、大小写、括号/冒号补全
///
/// 补全前先检查，已有的括号或冒号不会重复添加。
pub fn transform_text(text: &str, element_type: ElementType, rule: &FormattingRule) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut out = rule.text_transform.apply(trimmed);

    match element_type {
        ElementType::Parenthetical => {
            if !out.starts_with('(') {
                out.insert(0, '(');
            }
            if !out.ends_with(')') {
                out.push(')');
            }
        }
        ElementType::Transition => {
            if !out.ends_with(':') && !out.ends_with('.') {
                out.push(':');
            }
        }
        _ => {}
    }

    out
}

/// 左边距（像素）换算为空格数
pub fn indent_for(rule: &FormattingRule) -> usize {
    let chars = (rule.margin_left / ScreenplayConstants::PIXELS_PER_CHAR).round();
    if chars.is_finite() && chars > 0.0 {
        chars as usize
    } else {
        0
    }
}

/// 按类型排版一行
pub fn format(text: &str, element_type: ElementType, rules: &FormattingRuleTable) -> FormattedLine {
    let rule = rules.rule_for(element_type);
    let text = transform_text(text, element_type, rule);
    let indent = if text.is_empty() { 0 } else { indent_for(rule) };

    FormattedLine {
        text,
        element_type,
        indent,
        style: StyleDescriptor::from_rule(rule),
    }
}

/// 按类型名排版，未知类型使用 Action 规则
pub fn format_named(text: &str, element_type: &str, rules: &FormattingRuleTable) -> FormattedLine {
    format(text, ElementType::from_name(element_type), rules)
}

/// 整篇自动排版：逐行识别后输出带缩进的纯文本
pub fn format_script(content: &str, rules: &FormattingRuleTable) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let types = classify_lines(&lines);

    lines
        .iter()
        .zip(types)
        .map(|(line, t)| format(line, t, rules).to_plain_text())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 排版整个文档（保留各行自带的类型）
pub fn format_lines(script: &Script, rules: &FormattingRuleTable) -> Vec<FormattedLine> {
    script
        .iter()
        .map(|line| format(&line.text, line.element_type, rules))
        .collect()
}

/// 按各行已有的类型原地排版，类型不重新识别
pub fn format_script_in_place(script: &mut Script, rules: &FormattingRuleTable) {
    for line in script.lines.iter_mut() {
        line.text = format(&line.text, line.element_type, rules).to_plain_text();
    }
}
