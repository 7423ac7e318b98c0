use serde::{Deserialize, Serialize};

/// 场景信息（由场景标题行推导，不单独存储）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub scene_number: usize, // 从 1 开始，按行序严格递增
    pub line_index: usize,   // 场景标题所在行
    pub heading: String,     // 去掉编号后的标题文本
    pub location: String,
    pub time_of_day: String,
    pub interior: bool,
    pub exterior: bool,
}

impl Scene {
    pub fn new(
        scene_number: usize,
        line_index: usize,
        heading: String,
        location: String,
        time_of_day: String,
    ) -> Self {
        let upper = heading.to_uppercase();
        Scene {
            scene_number,
            line_index,
            interior: upper.starts_with("INT."),
            exterior: upper.starts_with("EXT."),
            heading,
            location,
            time_of_day,
        }
    }
}
