use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::models::formatting_rule::FormattingRuleTable;
use crate::pdf::layout::{LayoutOptions, PageSpec, PrintPositions, TitlePage};

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置格式错误: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 页面尺寸与边距（磅）
    pub page: PageSpec,
    /// 打印时各元素的位置
    pub print_positions: PrintPositions,
    /// 屏幕排版规则
    pub rules: FormattingRuleTable,
    /// 导出时是否为场景标题编号
    pub number_scenes: bool,
    /// 是否打印标题页
    pub print_title_page: bool,
    /// 标题
    pub title: String,
    /// 署名行
    pub credit: String,
    /// 作者
    pub author: String,
    /// 是否显示页码
    pub show_page_numbers: bool,
    /// 自动保存防抖间隔（毫秒）
    pub autosave_debounce_ms: u64,
    /// 字体名称
    pub font_family: String,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            page: PageSpec::default(),
            print_positions: PrintPositions::default(),
            rules: FormattingRuleTable::default(),
            number_scenes: true,
            print_title_page: false,
            title: String::new(),
            credit: "Written by".to_string(),
            author: String::new(),
            show_page_numbers: true,
            autosave_debounce_ms: 1000,
            font_family: "Courier".to_string(),
        }
    }
}

impl Conf {
    pub fn from_json_str(json: &str) -> Result<Conf, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Conf, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Conf::from_json_str(&content)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    /// 打印排版选项
    pub fn layout_options(&self) -> LayoutOptions {
        let title_page = if self.print_title_page && !self.title.trim().is_empty() {
            Some(TitlePage {
                title: self.title.clone(),
                credit: self.credit.clone(),
                author: self.author.clone(),
            })
        } else {
            None
        };

        LayoutOptions {
            number_scenes: self.number_scenes,
            title_page,
            show_page_numbers: self.show_page_numbers,
        }
    }
}
