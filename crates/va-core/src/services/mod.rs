pub mod config_loader;
pub mod engine;
pub mod history;
pub mod registrations;
pub mod sheet_reader;
pub mod sheet_writer;
pub mod table;
pub mod window_parser;
