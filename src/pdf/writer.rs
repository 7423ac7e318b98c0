use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::models::FontWeight;
use crate::pdf::layout::{PageSpec, PrintLayout};
use crate::pdf::{ExportError, ExportResult};

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// 文档信息
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// UTF-8 转 WinAnsi（CP1252）
///
/// 返回编码结果和被替换为 `?` 的字符数。
pub fn encode_winansi(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;

    for c in text.chars() {
        let code = c as u32;
        let byte = match c {
            _ if code < 0x80 => Some(code as u8),
            _ if (0xA0..=0xFF).contains(&code) => Some(code as u8),
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        };

        match byte {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(b'?');
                replaced += 1;
            }
        }
    }

    (bytes, replaced)
}

fn font_for(weight: FontWeight) -> Name<'static> {
    match weight {
        FontWeight::Bold => BOLD_FONT,
        FontWeight::Normal => REGULAR_FONT,
    }
}

/// 将打印指令渲染为 PDF
pub fn render_pdf(layout: &PrintLayout, page: &PageSpec, info: &DocumentInfo) -> ExportResult<Vec<u8>> {
    page.validate()?;

    let page_count = layout.page_count.max(1);
    if let Some(cmd) = layout.commands.iter().find(|c| c.page >= page_count) {
        return Err(ExportError::InvalidConfig(format!(
            "指令页序号越界: {} (共 {} 页)",
            cmd.page, page_count
        )));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let info_id = alloc();
    let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(b"Courier"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Courier-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut contents: Vec<Content> = (0..page_count).map(|_| Content::new()).collect();
    let mut replaced_total = 0;

    for cmd in &layout.commands {
        let (bytes, replaced) = encode_winansi(&cmd.text);
        if replaced > 0 {
            log::warn!("{} 个字符无法用 WinAnsi 编码，已替换为 '?': {}", replaced, cmd.text);
            replaced_total += replaced;
        }

        contents[cmd.page]
            .begin_text()
            .set_font(font_for(cmd.weight), page.font_size)
            .next_line(cmd.x, page.height - cmd.y)
            .show(Str(&bytes))
            .end_text();
    }

    for (i, content) in contents.into_iter().enumerate() {
        pdf.stream(content_ids[i], &content.finish());

        let mut pdf_page = pdf.page(page_ids[i]);
        pdf_page
            .media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        pdf_page
            .resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
    }

    {
        let mut doc_info = pdf.document_info(info_id);
        if !info.title.is_empty() {
            doc_info.title(TextStr(&info.title));
        }
        if !info.author.is_empty() {
            doc_info.author(TextStr(&info.author));
        }
        doc_info.creator(TextStr("scriptwriter_rust"));
    }

    let bytes = pdf.finish();
    log::info!(
        "PDF 生成完成: {} 页, {} 条指令, {} 字节, 替换字符 {}",
        page_count,
        layout.commands.len(),
        bytes.len(),
        replaced_total
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementType;
    use crate::pdf::layout::PrintCommand;

    #[test]
    fn winansi_maps_typographic_punctuation() {
        let (bytes, replaced) = encode_winansi("\u{201C}Hi\u{201D} \u{2014} caf\u{e9}");
        assert_eq!(bytes, vec![0x93, b'H', b'i', 0x94, b' ', 0x97, b' ', b'c', b'a', b'f', 0xE9]);
        assert_eq!(replaced, 0);
    }

    #[test]
    fn winansi_replaces_unsupported_chars() {
        let (bytes, replaced) = encode_winansi("剧本 A");
        assert_eq!(bytes, b"?? A".to_vec());
        assert_eq!(replaced, 2);
    }

    #[test]
    fn renders_one_pdf_page_per_layout_page() {
        let layout = PrintLayout {
            commands: vec![
                PrintCommand {
                    text: "INT. OFFICE - DAY".to_string(),
                    x: 90.0,
                    y: 84.0,
                    page: 0,
                    weight: FontWeight::Bold,
                    element: Some(ElementType::SceneHeading),
                },
                PrintCommand {
                    text: "He waits.".to_string(),
                    x: 90.0,
                    y: 84.0,
                    page: 1,
                    weight: FontWeight::Normal,
                    element: Some(ElementType::Action),
                },
            ],
            page_count: 2,
        };
        let info = DocumentInfo {
            title: "Test".to_string(),
            author: String::new(),
        };
        let bytes = render_pdf(&layout, &PageSpec::letter(), &info).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Courier-Bold"));
        assert!(text.contains("(INT. OFFICE - DAY) Tj"));
    }

    #[test]
    fn rejects_commands_past_the_last_page() {
        let layout = PrintLayout {
            commands: vec![PrintCommand {
                text: "x".to_string(),
                x: 90.0,
                y: 84.0,
                page: 3,
                weight: FontWeight::Normal,
                element: None,
            }],
            page_count: 1,
        };
        assert!(render_pdf(&layout, &PageSpec::letter(), &DocumentInfo::default()).is_err());
    }
}
