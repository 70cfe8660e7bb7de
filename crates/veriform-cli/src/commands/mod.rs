pub mod checks;
pub mod config_check;
pub mod fields;
pub mod run;
