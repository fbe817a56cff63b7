pub mod catalog;
pub mod localize;
pub mod settings;
pub mod workbench;
