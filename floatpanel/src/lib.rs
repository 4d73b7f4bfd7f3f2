pub mod app;
pub mod consts;
pub mod db;
pub mod errors;
mod ui;
