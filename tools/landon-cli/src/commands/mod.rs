pub mod capture;
pub mod check;
pub mod destination;
pub mod formats;
