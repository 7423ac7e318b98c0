use crate::models::{ElementType, Scene};
use crate::parser::classifier::{classify, classify_lines};
use crate::utils::{strip_scene_number, LINE_REGEX, SCENE_REGEX};

/// 是否为带 INT./EXT. 的场景标题（允许已有编号）
pub fn is_slugline(text: &str) -> bool {
    LINE_REGEX["slugline"].is_match(strip_scene_number(text.trim()))
}

/// 是否已带场景编号
pub fn has_scene_number(text: &str) -> bool {
    SCENE_REGEX["numbered"].is_match(text.trim())
}

/// 解析场景标题中的地点和时间
///
/// 没有 ` - ` 分隔时地点取标题剩余部分，时间记为 CONTINUOUS。
pub fn parse_location(heading: &str) -> (String, String) {
    let heading = heading.trim();
    if let Some(caps) = SCENE_REGEX["location"].captures(heading) {
        let location = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let time = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
        return (location.to_string(), time.to_uppercase());
    }

    let location = SCENE_REGEX["slug_prefix"].replace(heading, "");
    (location.trim().to_string(), "CONTINUOUS".to_string())
}

/// 按顺序提取场景
pub fn extract_scenes<S: AsRef<str>>(lines: &[S]) -> Vec<Scene> {
    let mut scenes = Vec::new();
    let mut counter = 0;

    for (index, line) in lines.iter().enumerate() {
        let text = line.as_ref();
        if classify(text, lines, index) != ElementType::SceneHeading || !is_slugline(text) {
            continue;
        }

        counter += 1;
        let heading = strip_scene_number(text.trim()).to_string();
        let (location, time_of_day) = parse_location(&heading);
        scenes.push(Scene::new(counter, index, heading, location, time_of_day));
    }

    scenes
}

/// 为场景标题加编号
///
/// 已经带编号的标题保持原样，重复调用不会出现 `2. 1. INT. ...`。
pub fn add_scene_numbers(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let types = classify_lines(&lines);
    let mut counter = 0;

    lines
        .iter()
        .zip(types)
        .map(|(line, t)| {
            if t != ElementType::SceneHeading || !is_slugline(line) {
                return line.to_string();
            }
            counter += 1;
            if has_scene_number(line) {
                line.to_string()
            } else {
                format!("{}. {}", counter, line.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 去掉场景标题上的编号，其他以数字开头的行不动
pub fn remove_scene_numbers(content: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if has_scene_number(line) && is_slugline(line) {
                SCENE_REGEX["number_prefix_spaced"].replace(line, "$1").to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 按当前顺序重新编号
pub fn renumber_scenes(content: &str) -> String {
    add_scene_numbers(&remove_scene_numbers(content))
}

/// 两位补零显示
pub fn format_scene_number_for_display(scene_number: usize) -> String {
    format!("{:02}", scene_number)
}

/// 用给定编号替换标题上的编号
pub fn format_scene_header_with_number(content: &str, scene_number: usize) -> String {
    format!("{}. {}", scene_number, strip_scene_number(content.trim()))
}
