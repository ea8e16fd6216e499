pub mod components;
pub mod views;
