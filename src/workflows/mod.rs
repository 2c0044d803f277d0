pub mod case;
pub mod repair_import;
