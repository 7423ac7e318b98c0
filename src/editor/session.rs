use std::sync::Arc;

use thiserror::Error;

use crate::editor::debouncer::Debouncer;
use crate::editor::store::{ProjectStore, StoreResult};
use crate::models::{Conf, DocumentStats, ElementType, FormattingRuleTable, ProjectSnapshot, Scene, Script, ScriptLine};
use crate::parser::classifier::classify;
use crate::parser::formatter::format;
use crate::parser::scene_numbering;

/// 手动指定类型被拒绝的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatRejection {
    #[error("第 {0} 行不存在")]
    NoSuchLine(usize),

    #[error("括号注释只能紧跟在角色名之后")]
    ParentheticalWithoutCharacter,

    #[error("转场只能跟在动作、对白或镜头之后")]
    TransitionOutOfPlace,
}

/// 检查能否把第 `index` 行设为 `element_type`
///
/// 只看紧邻的上一行。
pub fn can_apply_format(lines: &[ScriptLine], index: usize, element_type: ElementType) -> Result<(), FormatRejection> {
    if index >= lines.len() {
        return Err(FormatRejection::NoSuchLine(index));
    }

    let previous = index.checked_sub(1).and_then(|i| lines.get(i));
    let follows = |types: &[ElementType]| previous.map_or(false, |l| l.is_type(types));

    match element_type {
        ElementType::Parenthetical if !follows(&[ElementType::Character]) => {
            Err(FormatRejection::ParentheticalWithoutCharacter)
        }
        ElementType::Transition
            if !follows(&[ElementType::Action, ElementType::Dialogue, ElementType::Shot]) =>
        {
            Err(FormatRejection::TransitionOutOfPlace)
        }
        _ => Ok(()),
    }
}

/// 回车后新行的类型
pub fn next_element_type(current: &ScriptLine) -> ElementType {
    match current.element_type {
        ElementType::SceneHeading => ElementType::Action,
        ElementType::Character if !current.is_blank() => ElementType::Dialogue,
        ElementType::Character => ElementType::Action,
        ElementType::Dialogue => ElementType::Action,
        ElementType::Parenthetical => ElementType::Dialogue,
        ElementType::Action => ElementType::Action,
        ElementType::Transition => ElementType::SceneHeading,
        ElementType::Shot => ElementType::Action,
    }
}

/// 编辑会话
///
/// 持有文档、排版规则和自动保存防抖器。所有修改都在调用线程上同步完成，
/// 只有保存会被推迟。
pub struct EditingSession {
    title: String,
    script: Script,
    rules: FormattingRuleTable,
    debouncer: Debouncer,
    store: Option<Arc<dyn ProjectStore>>,
}

impl EditingSession {
    pub fn new(conf: &Conf) -> Self {
        EditingSession {
            title: conf.title.clone(),
            script: Script::new(),
            rules: conf.rules.clone(),
            debouncer: Debouncer::new(conf.autosave_interval()),
            store: None,
        }
    }

    pub fn from_text(text: &str, conf: &Conf) -> Self {
        let mut session = EditingSession::new(conf);
        session.script = Script::from_text(text);
        session
    }

    pub fn with_store(mut self, store: Arc<dyn ProjectStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn text(&self) -> String {
        self.script.text()
    }

    pub fn lines(&self) -> &[ScriptLine] {
        &self.script.lines
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn rules(&self) -> &FormattingRuleTable {
        &self.rules
    }

    /// 导出用的行快照
    pub fn snapshot(&self) -> Vec<ScriptLine> {
        self.script.lines.clone()
    }

    pub fn project_snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot::new(self.title.clone(), self.text())
    }

    // 重新识别 [from, to] 范围内的非手动行
    fn reclassify_range(&mut self, from: usize, to: usize) {
        if self.script.is_empty() {
            return;
        }
        let last = to.min(self.script.len() - 1);
        let texts = self.script.texts();
        for i in from..=last {
            let line = &mut self.script.lines[i];
            if !line.manual {
                line.element_type = classify(&texts[i], &texts, i);
            }
        }
    }

    fn reclassify_around(&mut self, index: usize) {
        self.reclassify_range(index.saturating_sub(1), index + 1);
    }

    fn reclassify_all(&mut self) {
        self.reclassify_range(0, usize::MAX);
    }

    pub fn replace_line(&mut self, index: usize, text: &str) -> bool {
        match self.script.lines.get_mut(index) {
            Some(line) => line.text = text.to_string(),
            None => return false,
        }
        self.reclassify_around(index);
        true
    }

    /// 在 `index` 处插入一行；指定类型的行标记为手动
    pub fn insert_line(&mut self, index: usize, text: &str, element_type: Option<ElementType>) -> bool {
        if index > self.script.len() {
            return false;
        }
        let line = match element_type {
            Some(t) => ScriptLine::manual(text, t),
            None => ScriptLine::new(text, ElementType::Action),
        };
        self.script.lines.insert(index, line);
        self.reclassify_around(index);
        true
    }

    pub fn delete_line(&mut self, index: usize) -> bool {
        if index >= self.script.len() {
            return false;
        }
        self.script.lines.remove(index);
        self.reclassify_range(index.saturating_sub(1), index);
        true
    }

    /// 手动设置类型并按规则排版该行
    pub fn apply_element_type(&mut self, index: usize, element_type: ElementType) -> Result<(), FormatRejection> {
        can_apply_format(&self.script.lines, index, element_type)?;

        let formatted = format(&self.script.lines[index].text, element_type, &self.rules);
        let line = &mut self.script.lines[index];
        line.text = formatted.text;
        line.element_type = element_type;
        line.manual = true;

        self.reclassify_around(index);
        Ok(())
    }

    /// 回车：在 `index` 之后插入空行并返回新行位置
    pub fn smart_enter(&mut self, index: usize) -> Option<usize> {
        let next_type = next_element_type(self.script.get(index)?);
        let at = index + 1;
        self.script.lines.insert(at, ScriptLine::manual("", next_type));
        self.reclassify_around(at);
        Some(at)
    }

    /// 整篇排版，每行沿用当前类型
    ///
    /// 排版后文本若会被识别成别的类型（如 `pov john` 变成全大写），该行标为手动，
    /// 之后编辑相邻行时不会被改掉。
    pub fn auto_format(&mut self) {
        for line in self.script.lines.iter_mut() {
            line.text = format(&line.text, line.element_type, &self.rules).text;
        }
        let texts = self.script.texts();
        for (i, line) in self.script.lines.iter_mut().enumerate() {
            if !line.manual && classify(&texts[i], &texts, i) != line.element_type {
                line.manual = true;
            }
        }
        log::debug!("整篇排版完成: {} 行", self.script.len());
    }

    // 整篇文本变换，行数不变
    fn rewrite_texts(&mut self, rewritten: String) {
        for (line, text) in self.script.lines.iter_mut().zip(rewritten.split('\n')) {
            line.text = text.to_string();
        }
        self.reclassify_all();
    }

    pub fn add_scene_numbers(&mut self) {
        let numbered = scene_numbering::add_scene_numbers(&self.text());
        self.rewrite_texts(numbered);
    }

    pub fn remove_scene_numbers(&mut self) {
        let plain = scene_numbering::remove_scene_numbers(&self.text());
        self.rewrite_texts(plain);
    }

    pub fn scenes(&self) -> Vec<Scene> {
        scene_numbering::extract_scenes(&self.script.texts())
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats::from_text(&self.text())
    }

    /// 推迟保存；连续调用只保存最后一次
    pub fn schedule_save(&mut self) {
        let store = match &self.store {
            Some(store) => Arc::clone(store),
            None => return,
        };
        let snapshot = self.project_snapshot();
        self.debouncer.trigger(move || {
            if let Err(e) = store.save(&snapshot) {
                log::warn!("自动保存失败: {}", e);
            }
        });
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// 取消待执行的保存并立即保存
    pub fn flush(&mut self) -> StoreResult<()> {
        self.debouncer.cancel();
        match &self.store {
            Some(store) => store.save(&self.project_snapshot()),
            None => Ok(()),
        }
    }
}
