//! 对外 API
//!
//! 供宿主应用（编辑器界面、命令行）调用的简化接口，结果以 JSON 字符串或
//! `ExportResult` 返回，不向调用方暴露内部错误类型。

use crate::export::{export_script, write_export, ExportFormat};
use crate::models::{Conf, DocumentStats, Script};
use crate::parser::{format_named, format_script, format_script_in_place, generate_html};
use crate::pdf::{ExportError, PageSpec};

/// 简化的配置结构，用于宿主应用调用
#[derive(Debug, Clone)]
pub struct SimpleConf {
    pub print_title_page: bool,
    /// 纸张：letter / a4
    pub paper: String,
    pub number_scenes: bool,
    pub show_page_numbers: bool,
    pub title: String,
    pub credit: String,
    pub author: String,
    /// 导出前先整篇排版
    pub auto_format: bool,
}

impl Default for SimpleConf {
    fn default() -> Self {
        Self {
            print_title_page: false,
            paper: "letter".to_string(),
            number_scenes: true,
            show_page_numbers: true,
            title: String::new(),
            credit: "Written by".to_string(),
            author: String::new(),
            auto_format: false,
        }
    }
}

impl From<SimpleConf> for Conf {
    fn from(simple: SimpleConf) -> Self {
        let mut conf = Conf::default();

        conf.page = match simple.paper.to_lowercase().as_str() {
            "a4" => PageSpec::a4(),
            "letter" => PageSpec::letter(),
            other => {
                log::warn!("未知纸张 {}，使用 letter", other);
                PageSpec::letter()
            }
        };

        conf.print_title_page = simple.print_title_page;
        conf.number_scenes = simple.number_scenes;
        conf.show_page_numbers = simple.show_page_numbers;
        conf.title = simple.title;
        conf.credit = simple.credit;
        conf.author = simple.author;
        conf
    }
}

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub success: bool,
    pub message: String,
    pub file_path: Option<String>,
    /// Base64 导出时的数据
    pub data: Option<String>,
}

impl ExportResult {
    fn failed(message: String) -> Self {
        ExportResult {
            success: false,
            message,
            file_path: None,
            data: None,
        }
    }
}

fn prepare(text: &str, config: Option<SimpleConf>) -> (Script, Conf) {
    let simple = config.unwrap_or_default();
    let auto_format = simple.auto_format;
    let conf: Conf = simple.into();

    // 先识别，再按识别出的类型排版，排版后的文本不再重新识别
    let mut script = Script::from_text(text);
    if auto_format {
        format_script_in_place(&mut script, &conf.rules);
    }
    (script, conf)
}

// 行快照移入阻塞线程池排版，界面线程不被占用
async fn render_in_background(script: Script, format: ExportFormat, conf: Conf) -> Result<Vec<u8>, ExportError> {
    tokio::task::spawn_blocking(move || export_script(&script, format, &conf))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}

/// 识别每行类型，返回 JSON 数组 `[{text, element_type, manual}]`
pub fn classify_text_json(text: String) -> String {
    let script = Script::from_text(&text);
    serde_json::to_string(&script.lines).unwrap_or_else(|_| "[]".to_string())
}

/// 按类型名排版单行（带缩进的纯文本）
pub fn format_line(text: String, element_type: String) -> String {
    let conf = Conf::default();
    format_named(&text, &element_type, &conf.rules).to_plain_text()
}

/// 整篇自动排版
pub fn format_text(text: String, config: Option<SimpleConf>) -> String {
    let conf: Conf = config.unwrap_or_default().into();
    format_script(&text, &conf.rules)
}

/// 预览 HTML
pub fn preview_html(text: String) -> String {
    let conf = Conf::default();
    generate_html(&Script::from_text(&text), &conf.rules)
}

/// 文档统计 JSON
pub fn document_stats_json(text: String) -> String {
    serde_json::to_string(&DocumentStats::from_text(&text)).unwrap_or_else(|_| "{}".to_string())
}

/// 导出到文件
pub async fn export_to_file(
    text: String,
    output_path: String,
    format: ExportFormat,
    config: Option<SimpleConf>,
) -> ExportResult {
    let (script, conf) = prepare(&text, config);

    let bytes = match render_in_background(script, format, conf).await {
        Ok(bytes) => bytes,
        Err(e) => return ExportResult::failed(format!("导出失败: {}", e)),
    };

    match write_export(&output_path, &bytes) {
        Ok(()) => ExportResult {
            success: true,
            message: format!("{} 导出成功", format.extension().to_uppercase()),
            file_path: Some(output_path),
            data: None,
        },
        Err(e) => ExportResult::failed(format!("写入失败: {}", e)),
    }
}

/// 导出 PDF 文档
pub async fn export_to_pdf(text: String, output_path: String, config: Option<SimpleConf>) -> ExportResult {
    export_to_file(text, output_path, ExportFormat::Pdf, config).await
}

/// 导出纯文本
pub async fn export_to_txt(text: String, output_path: String, config: Option<SimpleConf>) -> ExportResult {
    export_to_file(text, output_path, ExportFormat::Txt, config).await
}

/// 导出 Final Draft 文件
pub async fn export_to_fdx(text: String, output_path: String, config: Option<SimpleConf>) -> ExportResult {
    export_to_file(text, output_path, ExportFormat::Fdx, config).await
}

/// 获取 PDF 文档的 Base64 编码
pub async fn export_to_pdf_base64(text: String, config: Option<SimpleConf>) -> ExportResult {
    let (script, conf) = prepare(&text, config);

    match render_in_background(script, ExportFormat::Pdf, conf).await {
        Ok(bytes) => ExportResult {
            success: true,
            message: "PDF Base64编码生成成功".to_string(),
            file_path: None,
            data: Some(base64::encode(bytes)),
        },
        Err(e) => ExportResult::failed(format!("生成失败: {}", e)),
    }
}
