use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::element_type::ElementType;

/// 水平对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// 大小写转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    None,
    Uppercase,
    Lowercase,
}

impl TextTransform {
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            TextTransform::None => "none",
            TextTransform::Uppercase => "uppercase",
            TextTransform::Lowercase => "lowercase",
        }
    }
}

/// 字重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// 单个元素类型的排版规则
///
/// 边距单位为像素，按等宽字体每字符 12px 标定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingRule {
    pub margin_left: f32,
    pub margin_right: f32,
    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    pub font_weight: FontWeight,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl FormattingRule {
    const fn new(
        margin_left: f32,
        margin_right: f32,
        text_align: TextAlign,
        text_transform: TextTransform,
        font_weight: FontWeight,
        margin_top: f32,
    ) -> Self {
        FormattingRule {
            margin_left,
            margin_right,
            text_align,
            text_transform,
            font_weight,
            margin_top,
            margin_bottom: 0.0,
        }
    }

    /// 行业标准规则
    pub fn standard(element_type: ElementType) -> FormattingRule {
        use FontWeight::*;
        use TextAlign::*;
        use TextTransform::*;

        match element_type {
            ElementType::SceneHeading => FormattingRule::new(0.0, 60.0, Left, Uppercase, Bold, 24.0),
            // 角色名约在 3.7 英寸处
            ElementType::Character => FormattingRule::new(220.0, 0.0, Center, Uppercase, Bold, 12.0),
            ElementType::Dialogue => FormattingRule::new(100.0, 120.0, Left, None, Normal, 0.0),
            ElementType::Parenthetical => FormattingRule::new(160.0, 100.0, Center, None, Normal, 0.0),
            ElementType::Action => FormattingRule::new(0.0, 60.0, Left, None, Normal, 12.0),
            ElementType::Transition => FormattingRule::new(0.0, 0.0, Right, Uppercase, Bold, 12.0),
            ElementType::Shot => FormattingRule::new(0.0, 60.0, Left, Uppercase, Bold, 12.0),
        }
    }
}

/// 排版规则表，按元素类型索引
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattingRuleTable {
    rules: HashMap<ElementType, FormattingRule>,
}

lazy_static! {
    static ref STANDARD_RULES: FormattingRuleTable = FormattingRuleTable::build_standard();
    static ref STANDARD_ACTION_RULE: FormattingRule = FormattingRule::standard(ElementType::Action);
}

impl FormattingRuleTable {
    fn build_standard() -> Self {
        let rules = ElementType::ALL
            .iter()
            .map(|t| (*t, FormattingRule::standard(*t)))
            .collect();
        FormattingRuleTable { rules }
    }

    /// 共享的标准规则表（只加载一次）
    pub fn standard() -> &'static FormattingRuleTable {
        &STANDARD_RULES
    }

    /// 由自定义规则构建；缺失的类型在查找时退回 Action 规则
    pub fn from_rules(rules: HashMap<ElementType, FormattingRule>) -> Self {
        FormattingRuleTable { rules }
    }

    /// 查找规则
    ///
    /// 表中没有该类型时使用表内的 Action 规则，仍然没有则使用标准 Action 规则。
    pub fn rule_for(&self, element_type: ElementType) -> &FormattingRule {
        self.rules
            .get(&element_type)
            .or_else(|| self.rules.get(&ElementType::Action))
            .unwrap_or(&STANDARD_ACTION_RULE)
    }

    /// 按名称查找，未知名称使用 Action 规则
    pub fn rule_for_name(&self, name: &str) -> &FormattingRule {
        self.rule_for(ElementType::from_name(name))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for FormattingRuleTable {
    fn default() -> Self {
        FormattingRuleTable::standard().clone()
    }
}
