pub mod browser;
pub mod catalog;
pub mod net;
