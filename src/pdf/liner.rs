use crate::models::FontWeight;
use crate::pdf::metrics::TextMeasurer;
use crate::pdf::ExportResult;

/// 行处理器：按可用宽度折行
pub struct Liner<'a, M: TextMeasurer + ?Sized> {
    /// 测量器
    pub measurer: &'a M,
    /// 字号
    pub font_size: f32,
    /// 字重
    pub weight: FontWeight,
}

impl<'a, M: TextMeasurer + ?Sized> Liner<'a, M> {
    /// 创建新的行处理器
    pub fn new(measurer: &'a M, font_size: f32, weight: FontWeight) -> Self {
        Self {
            measurer,
            font_size,
            weight,
        }
    }

    pub fn width(&self, text: &str) -> ExportResult<f32> {
        self.measurer.measure(text, self.font_size, self.weight)
    }

    /// 贪心折行
    ///
    /// 只在空白处断开；单个词超宽时独占一行，不会被截断。
    pub fn wrap(&self, text: &str, max_width: f32) -> ExportResult<Vec<String>> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{} {}", current, word);
            if self.width(&candidate)? <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        Ok(lines)
    }
}

/// 便捷函数：按给定测量器折行
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    max_width: f32,
    measurer: &M,
    font_size: f32,
    weight: FontWeight,
) -> ExportResult<Vec<String>> {
    Liner::new(measurer, font_size, weight).wrap(text, max_width)
}
