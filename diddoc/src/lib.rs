#[macro_use]
extern crate serde;

pub mod aries;
pub mod errors;
pub mod validation;
pub mod w3c;
