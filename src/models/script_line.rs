use serde::{Deserialize, Serialize};

use crate::models::element_type::ElementType;
use crate::parser::classifier::classify_lines;
use crate::utils::is_blank_line;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub text: String,              // 行文本
    pub element_type: ElementType, // 元素类型
    #[serde(default)]
    pub manual: bool,              // 用户手动指定的类型，自动重新识别时保留
}

impl ScriptLine {
    pub fn new(text: impl Into<String>, element_type: ElementType) -> Self {
        ScriptLine {
            text: text.into(),
            element_type,
            manual: false,
        }
    }

    pub fn manual(text: impl Into<String>, element_type: ElementType) -> Self {
        ScriptLine {
            text: text.into(),
            element_type,
            manual: true,
        }
    }

    pub fn is_blank(&self) -> bool {
        is_blank_line(&self.text)
    }

    // 检查类型是否匹配
    pub fn is_type(&self, types: &[ElementType]) -> bool {
        types.contains(&self.element_type)
    }
}

/// 剧本文档：按文档顺序排列的行
///
/// 每行自带类型，不维护按行号索引的旁路表，插入和删除行不会让类型错位。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

impl Script {
    pub fn new() -> Self {
        Script { lines: Vec::new() }
    }

    /// 拆分文本为行并逐行识别类型
    pub fn from_text(text: &str) -> Self {
        let raw = split_lines(text);
        let types = classify_lines(&raw);
        let lines = raw
            .into_iter()
            .zip(types)
            .map(|(text, element_type)| ScriptLine::new(text, element_type))
            .collect();
        Script { lines }
    }

    /// 还原为纯文本
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScriptLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScriptLine> {
        self.lines.iter()
    }

    /// 某类型的行数
    pub fn count_of(&self, element_type: ElementType) -> usize {
        self.lines
            .iter()
            .filter(|l| l.element_type == element_type)
            .count()
    }
}

impl From<Vec<ScriptLine>> for Script {
    fn from(lines: Vec<ScriptLine>) -> Self {
        Script { lines }
    }
}

/// 按 `\n` 拆分，去掉每行末尾的 `\r`
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect()
}
