pub mod day_editor;
pub mod day_view;
pub mod month_view;

pub use day_editor::DayEditor;
pub use day_view::DayView;
pub use month_view::{DayCell, MonthView};
