use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 每页按 55 行估算页数
pub const LINES_PER_PAGE: usize = 55;

/// 文档统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub word_count: usize,
    pub page_count: usize,
    pub character_count: usize,
}

impl DocumentStats {
    pub fn from_text(content: &str) -> Self {
        let word_count = content.split_whitespace().count();
        let line_count = content.split('\n').count();
        DocumentStats {
            word_count,
            page_count: (line_count + LINES_PER_PAGE - 1) / LINES_PER_PAGE,
            character_count: content.chars().count(),
        }
    }
}

/// 交给外部存储的项目快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub title: String,
    pub content: String,
    pub stats: DocumentStats,
    pub updated_at: DateTime<Utc>,
}

impl ProjectSnapshot {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        ProjectSnapshot {
            title: title.into(),
            stats: DocumentStats::from_text(&content),
            content,
            updated_at: Utc::now(),
        }
    }

    /// 新建项目时的初始剧本
    pub fn starter(title: &str) -> Self {
        let content = format!(
            "FADE IN:\n\nEXT. {} - DAY\n\nA new story begins...\n\nFADE OUT.",
            title.to_uppercase()
        );
        ProjectSnapshot::new(title, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_count_words_pages_and_chars() {
        let stats = DocumentStats::from_text("INT. ROOM - DAY\n\nJOHN\nHi.");
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.character_count, 25);

        let long = vec!["line"; 56].join("\n");
        assert_eq!(DocumentStats::from_text(&long).page_count, 2);
    }

    #[test]
    fn starter_project_has_a_slugline() {
        let snapshot = ProjectSnapshot::starter("Night Train");
        assert!(snapshot.content.contains("EXT. NIGHT TRAIN - DAY"));
        assert_eq!(snapshot.stats, DocumentStats::from_text(&snapshot.content));
    }
}
