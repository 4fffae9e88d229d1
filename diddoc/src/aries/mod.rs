pub mod diddoc;
pub mod service;
