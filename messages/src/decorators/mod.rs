pub mod attachment;
pub mod thread;
pub mod timing;
