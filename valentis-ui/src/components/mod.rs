mod charts;
mod data_table;
mod file_upload;
mod layout;
mod widgets;

pub use charts::{ForecastChart, HeatmapGrid};
pub use data_table::{Column, DataTable};
pub use file_upload::FileUpload;
pub use layout::{Header, Sidebar};
pub use widgets::{
    ConfidenceBar, DetailHeader, ErrorPanel, Loading, RiskBadge, SeverityPill, StatCard,
};
