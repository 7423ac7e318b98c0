use unicode_segmentation::UnicodeSegmentation;

use crate::models::FontWeight;
use crate::pdf::{ExportError, ExportResult};

/// 文字宽度测量
///
/// 右对齐和自动换行都依赖测量结果；测量失败会终止整个导出。
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f32, weight: FontWeight) -> ExportResult<f32>;
}

/// Courier / Courier-Bold 字宽：每个字素 600/1000 em
#[derive(Debug, Clone, Copy, Default)]
pub struct CourierMetrics;

impl CourierMetrics {
    pub const ADVANCE: f32 = 0.6;
}

impl TextMeasurer for CourierMetrics {
    fn measure(&self, text: &str, font_size: f32, _weight: FontWeight) -> ExportResult<f32> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(ExportError::Measurement(format!("无效的字号: {}", font_size)));
        }
        let clusters = text.graphemes(true).count();
        Ok(clusters as f32 * Self::ADVANCE * font_size)
    }
}
