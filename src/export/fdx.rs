use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::Script;

const FDX_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n";

/// 最小 Final Draft XML
///
/// 每个非空行一个 `<Paragraph>`，只保留类型和文字。
pub fn export_fdx(script: &Script) -> Vec<u8> {
    let mut buffer = String::from(FDX_HEADER);
    buffer.push_str("<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"1\">\n");
    buffer.push_str("  <Content>\n");

    for line in script.iter().filter(|l| !l.is_blank()) {
        buffer.push_str(&format!(
            "    <Paragraph Type=\"{}\">\n      <Text>{}</Text>\n    </Paragraph>\n",
            encode_double_quoted_attribute(line.element_type.fdx_paragraph_type()),
            encode_text(line.text.trim())
        ));
    }

    buffer.push_str("  </Content>\n");
    buffer.push_str("</FinalDraft>\n");
    buffer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fdx_has_one_paragraph_per_non_empty_line() {
        let script = Script::from_text("INT. R&D LAB - DAY\n\nJOHN\n<beat> Fine.");
        let xml = String::from_utf8(export_fdx(&script)).unwrap();

        assert!(xml.starts_with(FDX_HEADER));
        assert!(xml.contains("<FinalDraft DocumentType=\"Script\" Template=\"No\" Version=\"1\">"));
        assert_eq!(xml.matches("<Paragraph ").count(), 3);
        assert!(xml.contains("<Paragraph Type=\"Scene Heading\">\n      <Text>INT. R&amp;D LAB - DAY</Text>"));
        assert!(xml.contains("<Paragraph Type=\"Character\">"));
        assert!(xml.contains("<Text>&lt;beat&gt; Fine.</Text>"));
        assert!(xml.trim_end().ends_with("</FinalDraft>"));
    }

    #[test]
    fn empty_script_still_has_skeleton() {
        let xml = String::from_utf8(export_fdx(&Script::new())).unwrap();
        assert!(xml.contains("<Content>\n  </Content>"));
    }
}
