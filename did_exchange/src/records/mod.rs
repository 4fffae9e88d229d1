pub mod connection;
pub mod mediation;
