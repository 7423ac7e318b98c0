pub mod fdx;
pub mod txt;

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::models::{Conf, Script};
use crate::pdf::generate_pdf;

pub use crate::pdf::{ExportError, ExportResult};
pub use fdx::export_fdx;
pub use txt::export_txt;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Txt,
    Fdx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
            ExportFormat::Fdx => "fdx",
        }
    }

    pub fn from_name(name: &str) -> Option<ExportFormat> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "txt" | "text" => Some(ExportFormat::Txt),
            "fdx" | "finaldraft" => Some(ExportFormat::Fdx),
            _ => None,
        }
    }
}

/// 按格式生成导出内容
pub fn export_script(script: &Script, format: ExportFormat, conf: &Conf) -> ExportResult<Vec<u8>> {
    log::debug!("导出 {} 行为 {}", script.len(), format.extension());
    match format {
        ExportFormat::Txt => Ok(export_txt(script)),
        ExportFormat::Fdx => Ok(export_fdx(script)),
        ExportFormat::Pdf => generate_pdf(&script.lines, conf),
    }
}

/// 原子写入：先写同目录临时文件，成功后再替换目标
pub fn write_export(path: impl AsRef<Path>, bytes: &[u8]) -> ExportResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;

    log::info!("已写入 {} ({} 字节)", path.display(), bytes.len());
    Ok(())
}
