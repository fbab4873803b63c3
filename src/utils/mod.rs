pub mod iso_datetime;
