#[macro_use]
extern crate log;

pub mod errors;
pub mod manager;
pub mod mediation;
pub mod multitenant;
pub mod records;
pub mod responder;
pub mod signing;
pub mod storage;
pub mod utils;
pub mod wallet;
