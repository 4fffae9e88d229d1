pub mod coordinate_mediation;
pub mod did_exchange;
pub mod out_of_band;
