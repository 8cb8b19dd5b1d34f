pub mod controller;
pub mod statement;
pub mod table;
pub mod view;

pub use controller::ReportController;
pub use statement::StatementType;
pub use table::{Cell, CellStyle, ReportTable, Sign, StatementView};
pub use view::ReportView;
