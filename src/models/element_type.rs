use serde::{Deserialize, Serialize};
use std::fmt;

/// 剧本元素类型
///
/// 每一行剧本文本恰好属于其中一种类型，无法识别时归为 `Action`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Shot,
}

impl ElementType {
    /// 全部类型，顺序与快捷键 1..=7 一致
    pub const ALL: [ElementType; 7] = [
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Shot,
    ];

    /// snake_case 名称（与序列化结果相同）
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene_heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Shot => "shot",
        }
    }

    /// 界面显示用标签
    pub fn label(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Transition => "Transition",
            ElementType::Shot => "Shot",
        }
    }

    /// HTML 预览中使用的 class 名
    pub fn css_class(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene-heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Shot => "shot",
        }
    }

    /// Final Draft 段落类型名
    pub fn fdx_paragraph_type(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "Scene Heading",
            ElementType::Action => "Action",
            ElementType::Character => "Character",
            ElementType::Dialogue => "Dialogue",
            ElementType::Parenthetical => "Parenthetical",
            ElementType::Transition => "Transition",
            ElementType::Shot => "Shot",
        }
    }

    /// 按名称解析类型
    ///
    /// 接受 `scene_heading`、`SceneHeading`、`Scene Heading` 等写法，
    /// 未知名称一律退回 `Action`。
    pub fn from_name(name: &str) -> ElementType {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(|c| c.to_lowercase())
            .collect();

        match normalized.as_str() {
            "sceneheading" | "scene" | "slugline" => ElementType::SceneHeading,
            "character" => ElementType::Character,
            "dialogue" | "dialog" => ElementType::Dialogue,
            "parenthetical" => ElementType::Parenthetical,
            "transition" => ElementType::Transition,
            "shot" => ElementType::Shot,
            _ => ElementType::Action,
        }
    }

    /// 快捷键数字（Cmd/Ctrl + 1..7）对应的类型
    pub fn from_shortcut(digit: u8) -> Option<ElementType> {
        match digit {
            1..=7 => Some(Self::ALL[(digit - 1) as usize]),
            _ => None,
        }
    }

    /// 该类型对应的快捷键数字
    pub fn shortcut(&self) -> u8 {
        Self::ALL
            .iter()
            .position(|t| t == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(2)
    }
}

impl Default for ElementType {
    fn default() -> Self {
        ElementType::Action
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
