/*
* Resources Hub
*/

/* --------------------------- Declare Modules -------------------------- */
pub mod config;
pub mod shared;
pub mod usb_resources;

pub use config::*;
pub use shared::*;
pub use usb_resources::*;
