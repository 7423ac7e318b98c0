pub mod element_type;
pub mod formatting_rule;
pub mod script_line;
pub mod scene;
pub mod project;
pub mod conf;

pub use element_type::ElementType;
pub use formatting_rule::{FormattingRule, FormattingRuleTable, TextAlign, TextTransform, FontWeight};
pub use script_line::{ScriptLine, Script, split_lines};
pub use scene::Scene;
pub use project::{DocumentStats, ProjectSnapshot, LINES_PER_PAGE};
pub use conf::{Conf, ConfigError};
