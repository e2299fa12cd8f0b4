/*
* Board Hub
*/

/* --------------------------- Library -------------------------- */
use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals;
use embassy_rp::usb::InterruptHandler as UsbInterruptHandler;

/* --------------------------- Declare Modules -------------------------- */
pub mod gpio_list;
pub mod global_resources;

pub use gpio_list::*;
pub use global_resources::*;
