pub mod classifier;
pub mod formatter;
pub mod scene_numbering;
pub mod text_processor;

pub use classifier::{classify, classify_lines, classify_text, ClassifyContext};
pub use formatter::{
    format,
    format_named,
    format_script,
    format_script_in_place,
    format_lines,
    transform_text,
    FormattedLine,
    StyleDescriptor
};
pub use scene_numbering::{
    extract_scenes,
    add_scene_numbers,
    remove_scene_numbers,
    renumber_scenes,
    format_scene_number_for_display,
    format_scene_header_with_number
};
pub use text_processor::{
    generate_html,
    generate_title_html
};
