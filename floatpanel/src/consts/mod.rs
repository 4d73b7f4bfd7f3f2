pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");

pub const DB_FILE: &str = "db.sqlite";
pub const LOG_FILTER: &str = "floatpanel=info,egui_float_panel=info";
