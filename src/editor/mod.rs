pub mod cursor;
pub mod debouncer;
pub mod session;
pub mod store;

pub use cursor::{
    element_type_at_cursor,
    format_line_at_cursor,
    insert_text_at_cursor,
    line_at_cursor,
    CursorEdit,
    CursorLine
};
pub use debouncer::Debouncer;
pub use session::{can_apply_format, next_element_type, EditingSession, FormatRejection};
pub use store::{JsonFileStore, MemoryStore, ProjectStore, StoreError, StoreResult};
