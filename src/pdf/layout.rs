use serde::{Deserialize, Serialize};

use crate::models::{ElementType, FontWeight, FormattingRuleTable, ScriptLine, TextAlign};
use crate::parser::formatter::transform_text;
use crate::parser::scene_numbering::{has_scene_number, is_slugline};
use crate::pdf::liner::Liner;
use crate::pdf::metrics::{CourierMetrics, TextMeasurer};
use crate::pdf::{ExportError, ExportResult};

/// 页面规格（单位：磅）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// 字号
    pub font_size: f32,
    /// 行高（12 磅字 × 1.2）
    pub line_height: f32,
    /// 底部预留
    pub slack: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::letter()
    }
}

impl PageSpec {
    /// US Letter 612×792
    pub fn letter() -> Self {
        PageSpec {
            width: 612.0,
            height: 792.0,
            margin_left: 90.0,
            margin_right: 54.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            font_size: 12.0,
            line_height: 14.4,
            slack: 0.0,
        }
    }

    /// A4 595×842
    pub fn a4() -> Self {
        PageSpec {
            width: 595.0,
            height: 842.0,
            ..PageSpec::letter()
        }
    }

    /// 正文第一行基线
    pub fn first_baseline(&self) -> f32 {
        self.margin_top + self.font_size
    }

    /// 基线不得超过的位置
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom - self.slack
    }

    pub fn validate(&self) -> ExportResult<()> {
        let values = [
            ("width", self.width),
            ("height", self.height),
            ("font_size", self.font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExportError::InvalidConfig(format!("{} 必须为正数: {}", name, value)));
            }
        }

        let margins = [self.margin_left, self.margin_right, self.margin_top, self.margin_bottom, self.slack];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(ExportError::InvalidConfig("边距不能为负数".to_string()));
        }

        if self.margin_left + self.margin_right >= self.width {
            return Err(ExportError::InvalidConfig("左右边距超过页面宽度".to_string()));
        }

        if self.first_baseline() > self.content_bottom() {
            return Err(ExportError::InvalidConfig("页面高度放不下一行文字".to_string()));
        }

        Ok(())
    }
}

/// 单个元素的打印位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintPosition {
    /// 相对左边距的缩进
    pub offset: f32,
    /// 在页面右边距之外额外收进的宽度
    pub right_inset: f32,
    /// 段前空行（以行高计，页首不计）
    pub space_before: f32,
    /// Left 或 Right；Right 时按实测宽度从右边距反推 x
    pub align: TextAlign,
}

impl PrintPosition {
    const fn left(offset: f32, right_inset: f32, space_before: f32) -> Self {
        PrintPosition {
            offset,
            right_inset,
            space_before,
            align: TextAlign::Left,
        }
    }
}

/// 各元素的打印位置表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintPositions {
    pub scene_heading: PrintPosition,
    pub action: PrintPosition,
    pub character: PrintPosition,
    pub dialogue: PrintPosition,
    pub parenthetical: PrintPosition,
    pub transition: PrintPosition,
    pub shot: PrintPosition,
}

impl Default for PrintPositions {
    fn default() -> Self {
        PrintPositions {
            scene_heading: PrintPosition::left(0.0, 0.0, 1.0),
            action: PrintPosition::left(0.0, 0.0, 0.5),
            character: PrintPosition::left(220.0, 0.0, 0.5),
            dialogue: PrintPosition::left(100.0, 66.0, 0.0),
            parenthetical: PrintPosition::left(160.0, 100.0, 0.0),
            transition: PrintPosition {
                offset: 0.0,
                right_inset: 0.0,
                space_before: 1.0,
                align: TextAlign::Right,
            },
            shot: PrintPosition::left(0.0, 0.0, 1.0),
        }
    }
}

impl PrintPositions {
    pub fn position_for(&self, element_type: ElementType) -> &PrintPosition {
        match element_type {
            ElementType::SceneHeading => &self.scene_heading,
            ElementType::Action => &self.action,
            ElementType::Character => &self.character,
            ElementType::Dialogue => &self.dialogue,
            ElementType::Parenthetical => &self.parenthetical,
            ElementType::Transition => &self.transition,
            ElementType::Shot => &self.shot,
        }
    }
}

/// 一条绘制指令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintCommand {
    pub text: String,
    pub x: f32,
    /// 基线位置，自页面顶端向下计
    pub y: f32,
    /// 页序号，从 0 开始
    pub page: usize,
    pub weight: FontWeight,
    /// 标题页和页码为 None
    pub element: Option<ElementType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintLayout {
    pub commands: Vec<PrintCommand>,
    pub page_count: usize,
}

impl PrintLayout {
    pub fn commands_on_page(&self, page: usize) -> impl Iterator<Item = &PrintCommand> {
        self.commands.iter().filter(move |c| c.page == page)
    }
}

/// 标题页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePage {
    pub title: String,
    pub credit: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// 为场景标题加 `N. ` 前缀
    pub number_scenes: bool,
    pub title_page: Option<TitlePage>,
    /// 从正文第二页起在右上角打印页码
    pub show_page_numbers: bool,
}

/// 分页游标
struct Paginator<'a> {
    page: &'a PageSpec,
    page_index: usize,
    y: f32,
    at_top: bool,
}

impl<'a> Paginator<'a> {
    fn new(page: &'a PageSpec, page_index: usize) -> Self {
        Paginator {
            page,
            page_index,
            y: page.first_baseline(),
            at_top: true,
        }
    }

    fn new_page(&mut self) {
        self.page_index += 1;
        self.y = self.page.first_baseline();
        self.at_top = true;
    }

    /// 段前空行，页首不计
    fn skip(&mut self, lines: f32) {
        if !self.at_top && lines > 0.0 {
            self.y += lines * self.page.line_height;
        }
    }

    /// 剩余空间能否再放 `lines` 行
    fn fits(&self, lines: usize) -> bool {
        let last = self.y + (lines.saturating_sub(1)) as f32 * self.page.line_height;
        last <= self.page.content_bottom()
    }

    /// 占用一行，返回 (页序号, 基线)
    fn place(&mut self) -> (usize, f32) {
        if self.y > self.page.content_bottom() {
            self.new_page();
        }
        let slot = (self.page_index, self.y);
        self.y += self.page.line_height;
        self.at_top = false;
        slot
    }
}

/// 打印排版引擎
pub struct PrintLayoutEngine<'a> {
    pub page: &'a PageSpec,
    pub positions: &'a PrintPositions,
    pub rules: &'a FormattingRuleTable,
    pub measurer: &'a dyn TextMeasurer,
    pub options: &'a LayoutOptions,
}

impl<'a> PrintLayoutEngine<'a> {
    pub fn layout(&self, lines: &[ScriptLine]) -> ExportResult<PrintLayout> {
        self.page.validate()?;

        let mut commands = Vec::new();
        let mut first_script_page = 0;

        if let Some(title_page) = &self.options.title_page {
            self.layout_title_page(title_page, &mut commands)?;
            first_script_page = 1;
        }

        let mut cursor = Paginator::new(self.page, first_script_page);
        let mut scene_counter = 0;

        for line in lines {
            let element = line.element_type;
            let rule = self.rules.rule_for(element);
            let mut text = transform_text(&line.text, element, rule);
            if text.is_empty() {
                continue;
            }

            if element == ElementType::SceneHeading && is_slugline(&text) {
                scene_counter += 1;
                if self.options.number_scenes && !has_scene_number(&text) {
                    text = format!("{}. {}", scene_counter, text);
                }
            }

            let weight = rule.font_weight;
            let position = self.positions.position_for(element);
            let liner = Liner::new(self.measurer, self.page.font_size, weight);

            let (x0, max_width) = self.column(position)?;
            let sub_lines = liner.wrap(&text, max_width)?;

            cursor.skip(position.space_before);

            // 场景标题和角色名不单独留在页尾
            let keep_with_next = matches!(element, ElementType::SceneHeading | ElementType::Character);
            if keep_with_next && !cursor.at_top && !cursor.fits(sub_lines.len() + 1) {
                cursor.new_page();
            }

            for sub_line in sub_lines {
                let x = match position.align {
                    TextAlign::Right => {
                        let w = liner.width(&sub_line)?;
                        (self.page.width - self.page.margin_right - position.right_inset - w)
                            .max(self.page.margin_left)
                    }
                    TextAlign::Center => {
                        let w = liner.width(&sub_line)?;
                        (x0 + (max_width - w) / 2.0).max(x0)
                    }
                    TextAlign::Left => x0,
                };

                let (page, y) = cursor.place();
                commands.push(PrintCommand {
                    text: sub_line,
                    x,
                    y,
                    page,
                    weight,
                    element: Some(element),
                });
            }
        }

        let mut page_count = cursor.page_index + 1;
        if commands.is_empty() {
            page_count = first_script_page + 1;
        }

        if self.options.show_page_numbers {
            self.layout_page_numbers(first_script_page, page_count, &mut commands)?;
        }

        log::debug!(
            "打印排版完成: {} 行输入, {} 条指令, {} 页",
            lines.len(),
            commands.len(),
            page_count
        );

        Ok(PrintLayout { commands, page_count })
    }

    /// 计算列起点和可用宽度
    fn column(&self, position: &PrintPosition) -> ExportResult<(f32, f32)> {
        let right_edge = self.page.width - self.page.margin_right - position.right_inset;
        let x0 = match position.align {
            TextAlign::Right => self.page.margin_left,
            _ => self.page.margin_left + position.offset,
        };
        let max_width = right_edge - x0;
        if max_width <= 0.0 {
            return Err(ExportError::InvalidConfig(format!(
                "元素列宽度不足: x={} 右界={}",
                x0, right_edge
            )));
        }
        Ok((x0, max_width))
    }

    fn centered(&self, text: &str, weight: FontWeight) -> ExportResult<f32> {
        let w = self.measurer.measure(text, self.page.font_size, weight)?;
        Ok(((self.page.width - w) / 2.0).max(0.0))
    }

    fn layout_title_page(&self, title_page: &TitlePage, commands: &mut Vec<PrintCommand>) -> ExportResult<()> {
        let mut y = self.page.height / 2.0 - 100.0;
        let title = title_page.title.trim().to_uppercase();
        let entries = [
            (title, FontWeight::Bold, 3.0),
            (title_page.credit.trim().to_string(), FontWeight::Normal, 1.0),
            (title_page.author.trim().to_string(), FontWeight::Normal, 0.0),
        ];

        for (text, weight, gap_after) in entries {
            if text.is_empty() {
                continue;
            }
            let x = self.centered(&text, weight)?;
            commands.push(PrintCommand {
                text,
                x,
                y,
                page: 0,
                weight,
                element: None,
            });
            y += (1.0 + gap_after) * self.page.line_height;
        }

        Ok(())
    }

    fn layout_page_numbers(
        &self,
        first_script_page: usize,
        page_count: usize,
        commands: &mut Vec<PrintCommand>,
    ) -> ExportResult<()> {
        let y = self.page.margin_top / 2.0 + self.page.font_size / 2.0;
        for page in (first_script_page + 1)..page_count {
            let text = format!("{}.", page - first_script_page + 1);
            let w = self.measurer.measure(&text, self.page.font_size, FontWeight::Normal)?;
            commands.push(PrintCommand {
                x: self.page.width - self.page.margin_right - w,
                text,
                y,
                page,
                weight: FontWeight::Normal,
                element: None,
            });
        }
        Ok(())
    }
}

/// 使用标准规则、Courier 字宽和默认位置排版
pub fn layout_for_print(lines: &[ScriptLine], page: &PageSpec) -> ExportResult<PrintLayout> {
    let options = LayoutOptions {
        number_scenes: true,
        ..LayoutOptions::default()
    };
    let engine = PrintLayoutEngine {
        page,
        positions: &PrintPositions::default(),
        rules: FormattingRuleTable::standard(),
        measurer: &CourierMetrics,
        options: &options,
    };
    engine.layout(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Script;

    fn layout(text: &str) -> PrintLayout {
        let script = Script::from_text(text);
        layout_for_print(&script.lines, &PageSpec::letter()).unwrap()
    }

    #[test]
    fn elements_land_in_their_columns() {
        use ElementType::*;
        let lines = vec![
            ScriptLine::new("INT. OFFICE - DAY", SceneHeading),
            ScriptLine::new("", Action),
            ScriptLine::new("JOHN", Character),
            ScriptLine::new("(smiling)", Parenthetical),
            ScriptLine::new("Hello there.", Dialogue),
            ScriptLine::new("", Action),
            ScriptLine::new("CUT TO:", Transition),
        ];
        let out = layout_for_print(&lines, &PageSpec::letter()).unwrap();
        let by_text = |t: &str| out.commands.iter().find(|c| c.text == t).unwrap().clone();

        let heading = by_text("1. INT. OFFICE - DAY");
        assert_eq!(heading.x, 90.0);
        assert_eq!(heading.weight, FontWeight::Bold);

        assert_eq!(by_text("JOHN").x, 310.0);
        assert_eq!(by_text("(smiling)").x, 250.0);
        assert_eq!(by_text("Hello there.").x, 190.0);

        let transition = by_text("CUT TO:");
        let width = 7.0 * 0.6 * 12.0;
        assert!((transition.x - (612.0 - 54.0 - width)).abs() < 1e-3);
        assert_eq!(out.page_count, 1);
    }

    #[test]
    fn blank_lines_produce_no_commands() {
        let out = layout("\n\n   \n");
        assert!(out.commands.is_empty());
        assert_eq!(out.page_count, 1);
    }

    #[test]
    fn dialogue_wraps_inside_its_column() {
        let speech = "word ".repeat(60);
        let out = layout(&format!("MARY\n{}", speech.trim()));
        let dialogue: Vec<_> = out
            .commands
            .iter()
            .filter(|c| c.element == Some(ElementType::Dialogue))
            .collect();
        assert!(dialogue.len() > 1);
        let right_edge = 612.0 - 54.0 - 66.0;
        for c in dialogue {
            let w = c.text.chars().count() as f32 * 7.2;
            assert!(c.x + w <= right_edge + 1e-3, "{}", c.text);
        }
    }

    #[test]
    fn long_scripts_break_pages() {
        let body = vec!["Something happens."; 120].join("\n");
        let out = layout(&body);
        assert!(out.page_count > 1);
        let bottom = PageSpec::letter().content_bottom();
        assert!(out.commands.iter().all(|c| c.y <= bottom));
        let second_page_first = out.commands.iter().find(|c| c.page == 1).unwrap();
        assert_eq!(second_page_first.y, PageSpec::letter().first_baseline());
    }

    #[test]
    fn character_cue_moves_with_its_dialogue() {
        use ElementType::*;
        // 43 行台词后角色名还放得下（710.4），后面的台词放不下
        let mut lines = vec![ScriptLine::new("Yes.", Dialogue); 43];
        lines.push(ScriptLine::new("JOHN", Character));
        lines.push(ScriptLine::new("Hello.", Dialogue));
        let out = layout_for_print(&lines, &PageSpec::letter()).unwrap();

        let filler = out.commands.iter().filter(|c| c.text == "Yes.").last().unwrap();
        assert_eq!(filler.page, 0);
        let cue_slot = filler.y + PageSpec::letter().line_height * 1.5;
        assert!(cue_slot <= PageSpec::letter().content_bottom());

        let cue = out.commands.iter().find(|c| c.text == "JOHN").unwrap();
        let speech = out.commands.iter().find(|c| c.text == "Hello.").unwrap();
        assert_eq!(cue.page, 1);
        assert_eq!(cue.y, PageSpec::letter().first_baseline());
        assert_eq!(speech.page, 1);
        assert_eq!(out.page_count, 2);
    }

    #[test]
    fn numbered_headings_are_not_renumbered() {
        let out = layout("4. INT. ROOM - DAY\n\nEXT. YARD - NIGHT");
        let texts: Vec<&str> = out.commands.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["4. INT. ROOM - DAY", "2. EXT. YARD - NIGHT"]);
    }

    #[test]
    fn title_page_and_page_numbers() {
        let script = Script::from_text(&vec!["Something happens."; 120].join("\n"));
        let options = LayoutOptions {
            number_scenes: true,
            title_page: Some(TitlePage {
                title: "Heist".to_string(),
                credit: "Written by".to_string(),
                author: "A. Writer".to_string(),
            }),
            show_page_numbers: true,
        };
        let page = PageSpec::letter();
        let engine = PrintLayoutEngine {
            page: &page,
            positions: &PrintPositions::default(),
            rules: FormattingRuleTable::standard(),
            measurer: &CourierMetrics,
            options: &options,
        };
        let out = engine.layout(&script.lines).unwrap();

        let title: Vec<_> = out.commands_on_page(0).collect();
        assert_eq!(title.len(), 3);
        assert_eq!(title[0].text, "HEIST");
        assert!(title.iter().all(|c| c.element.is_none()));

        // 正文第一页没有页码，第二页起为 "2."
        assert!(out.commands_on_page(1).all(|c| c.element.is_some()));
        assert!(out.commands_on_page(2).any(|c| c.text == "2." && c.element.is_none()));
    }

    #[test]
    fn impossible_page_is_rejected() {
        let mut page = PageSpec::letter();
        page.margin_top = 500.0;
        page.margin_bottom = 300.0;
        let script = Script::from_text("He runs.");
        assert!(matches!(
            layout_for_print(&script.lines, &page),
            Err(ExportError::InvalidConfig(_))
        ));
    }
}
