pub mod out_of_band;
