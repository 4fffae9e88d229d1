pub mod error;
mod mapping_diddoc;
mod mapping_others;
