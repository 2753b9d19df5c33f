pub mod combat;
pub mod core;
pub mod defense;
pub mod economy;
pub mod micro;
pub mod military;
pub mod production;
pub mod recon;
pub mod support;
pub mod tech;
