use serde::{Deserialize, Serialize};

use crate::models::{ElementType, FormattingRuleTable};
use crate::parser::classifier::classify;
use crate::parser::formatter::format;

/// 编辑结果：新文本与建议的光标位置（字符偏移）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorEdit {
    pub text: String,
    pub cursor: usize,
}

/// 光标所在行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorLine<'a> {
    pub index: usize,
    /// 行首字符偏移
    pub start: usize,
    /// 行尾字符偏移（不含换行符）
    pub end: usize,
    pub text: &'a str,
}

// 字符偏移转字节偏移，越界时取末尾
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(text.len())
}

/// 定位光标所在行，越界的光标视为位于文末
pub fn line_at_cursor(buffer: &str, cursor: usize) -> CursorLine<'_> {
    let mut start = 0;
    for (index, text) in buffer.split('\n').enumerate() {
        let end = start + text.chars().count();
        if cursor <= end {
            return CursorLine { index, start, end, text };
        }
        start = end + 1;
    }

    // split 至少产出一段，走到这里说明光标越界
    let last = buffer.rsplit('\n').next().unwrap_or("");
    let index = buffer.matches('\n').count();
    let end = buffer.chars().count();
    CursorLine {
        index,
        start: end - last.chars().count(),
        end,
        text: last,
    }
}

/// 光标所在行按上下文识别出的类型
pub fn element_type_at_cursor(buffer: &str, cursor: usize) -> ElementType {
    let lines: Vec<&str> = buffer.split('\n').collect();
    let current = line_at_cursor(buffer, cursor);
    classify(current.text, &lines, current.index)
}

/// 用指定类型排版光标所在行，光标移到该行末尾
pub fn format_line_at_cursor(
    buffer: &str,
    cursor: usize,
    element_type: ElementType,
    rules: &FormattingRuleTable,
) -> CursorEdit {
    let current = line_at_cursor(buffer, cursor);
    let formatted = format(current.text, element_type, rules).to_plain_text();

    let head = byte_offset(buffer, current.start);
    let tail = byte_offset(buffer, current.end);
    let text = format!("{}{}{}", &buffer[..head], formatted, &buffer[tail..]);

    CursorEdit {
        cursor: current.start + formatted.chars().count(),
        text,
    }
}

/// 在选区处插入文本（替换选中内容），光标移到插入内容之后
pub fn insert_text_at_cursor(buffer: &str, selection: (usize, usize), insert: &str) -> CursorEdit {
    let total = buffer.chars().count();
    let (a, b) = selection;
    let start = a.min(b).min(total);
    let end = a.max(b).min(total);

    let head = byte_offset(buffer, start);
    let tail = byte_offset(buffer, end);
    let text = format!("{}{}{}", &buffer[..head], insert, &buffer[tail..]);

    CursorEdit {
        text,
        cursor: start + insert.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUFFER: &str = "INT. OFFICE - DAY\njohn\nHello there.";

    #[test]
    fn finds_the_line_under_the_cursor() {
        let line = line_at_cursor(BUFFER, 20);
        assert_eq!(line.index, 1);
        assert_eq!(line.text, "john");
        assert_eq!((line.start, line.end), (18, 22));

        // 行尾换行符前的位置属于本行
        assert_eq!(line_at_cursor(BUFFER, 17).index, 0);
        assert_eq!(line_at_cursor(BUFFER, 999).text, "Hello there.");
    }

    #[test]
    fn formats_line_and_moves_cursor_to_its_end() {
        let edit = format_line_at_cursor(BUFFER, 19, ElementType::Character, FormattingRuleTable::standard());
        let expected_line = format!("{}JOHN", " ".repeat(18));
        assert_eq!(
            edit.text,
            format!("INT. OFFICE - DAY\n{}\nHello there.", expected_line)
        );
        assert_eq!(edit.cursor, 18 + expected_line.chars().count());
    }

    #[test]
    fn element_type_follows_context() {
        let buffer = "INT. OFFICE - DAY\nJOHN\nHello there.";
        assert_eq!(element_type_at_cursor(buffer, 0), ElementType::SceneHeading);
        assert_eq!(element_type_at_cursor(buffer, 19), ElementType::Character);
        assert_eq!(element_type_at_cursor(buffer, 25), ElementType::Dialogue);
    }

    #[test]
    fn insert_replaces_selection_with_multibyte_text() {
        let edit = insert_text_at_cursor("café noir", (5, 9), "crème");
        assert_eq!(edit.text, "café crème");
        assert_eq!(edit.cursor, 10);

        let edit = insert_text_at_cursor("abc", (9, 1), "X");
        assert_eq!(edit.text, "aX");
        assert_eq!(edit.cursor, 2);
    }
}
