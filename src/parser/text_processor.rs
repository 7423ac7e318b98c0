use html_escape::encode_text;

use crate::models::{FormattingRuleTable, Script, ScriptLine};
use crate::parser::formatter::format;

// 单行转换为 HTML（用于预览）
pub fn line_to_html(line: &ScriptLine, rules: &FormattingRuleTable) -> String {
    let formatted = format(&line.text, line.element_type, rules);
    if formatted.text.is_empty() {
        return format!("<div class=\"{} blank\"></div>", line.element_type.css_class());
    }

    format!(
        "<div class=\"{}\" style=\"{}\">{}</div>",
        line.element_type.css_class(),
        formatted.style.to_css(),
        encode_text(&formatted.text)
    )
}

// 生成预览 HTML 输出
pub fn generate_html(script: &Script, rules: &FormattingRuleTable) -> String {
    let mut buffer = String::new();
    for line in script.iter() {
        buffer.push_str(&line_to_html(line, rules));
        buffer.push('\n');
    }
    buffer
}

// 生成标题页 HTML 输出
pub fn generate_title_html(title: &str, credit: &str, author: &str) -> String {
    let mut buffer = String::new();
    for (class, text) in [("title", title), ("credit", credit), ("authors", author)] {
        if text.trim().is_empty() {
            continue;
        }
        buffer.push_str(&format!("<div class=\"{}\">{}</div>\n", class, encode_text(text.trim())));
    }
    buffer
}
