use crate::models::Script;

/// TXT 导出：文档原文
pub fn export_txt(script: &Script) -> Vec<u8> {
    script.text().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_is_the_raw_document() {
        let text = "INT. OFFICE - DAY\n\nJOHN\nHello there.";
        assert_eq!(export_txt(&Script::from_text(text)), text.as_bytes());
    }
}
