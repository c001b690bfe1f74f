pub mod classification;
pub mod patient;
