pub mod models;
pub mod utils;
pub mod parser;
pub mod pdf;
pub mod export;
pub mod editor;
pub mod api;

pub use models::{
    ElementType,
    FormattingRule,
    FormattingRuleTable,
    ScriptLine,
    Script,
    Scene,
    DocumentStats,
    ProjectSnapshot,
    Conf,
    ConfigError
};

pub use parser::{
    classify,
    classify_lines,
    classify_text,
    format,
    FormattedLine
};

pub use pdf::{
    generate_pdf,
    layout_for_print,
    ExportError,
    PageSpec,
    PrintCommand,
    PrintLayout
};

pub use export::{ExportFormat, export_script, write_export};

pub use editor::{EditingSession, FormatRejection, ProjectStore};

pub use api::{
    SimpleConf,
    ExportResult,
    classify_text_json,
    format_line,
    format_text,
    export_to_pdf,
    export_to_pdf_base64,
    export_to_txt,
    export_to_fdx
};

/// 识别并排版整篇剧本
///
/// # Arguments
///
/// * `script` - 剧本纯文本
/// * `config` - 配置对象
///
/// # Returns
///
/// 每行自带类型的文档和对应的排版结果
pub fn process(script: &str, config: &Conf) -> (Script, Vec<FormattedLine>) {
    let script = Script::from_text(script);
    let formatted = parser::format_lines(&script, &config.rules);
    (script, formatted)
}
