pub mod layout;
pub mod liner;
pub mod metrics;
pub mod writer;

use thiserror::Error;

use crate::models::{Conf, ScriptLine};

pub use layout::{
    layout_for_print,
    LayoutOptions,
    PageSpec,
    PrintCommand,
    PrintLayout,
    PrintLayoutEngine,
    PrintPosition,
    PrintPositions,
    TitlePage
};
pub use liner::{wrap_text, Liner};
pub use metrics::{CourierMetrics, TextMeasurer};
pub use writer::{encode_winansi, render_pdf, DocumentInfo};

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("文字测量失败: {0}")]
    Measurement(String),

    #[error("字体错误: {0}")]
    Font(String),

    #[error("无效的配置: {0}")]
    InvalidConfig(String),

    #[error("后台任务失败: {0}")]
    Task(String),
}

/// 导出结果
pub type ExportResult<T> = Result<T, ExportError>;

/// 排版并生成 PDF 字节
pub fn generate_pdf(lines: &[ScriptLine], conf: &Conf) -> ExportResult<Vec<u8>> {
    if !conf.font_family.eq_ignore_ascii_case("courier") {
        return Err(ExportError::Font(format!("不支持的字体: {}", conf.font_family)));
    }

    let options = conf.layout_options();
    let engine = PrintLayoutEngine {
        page: &conf.page,
        positions: &conf.print_positions,
        rules: &conf.rules,
        measurer: &CourierMetrics,
        options: &options,
    };
    let layout = engine.layout(lines)?;

    let info = DocumentInfo {
        title: conf.title.clone(),
        author: conf.author.clone(),
    };
    render_pdf(&layout, &conf.page, &info)
}
