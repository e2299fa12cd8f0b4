pub mod usb_handler;
pub mod encoder;
pub mod wheel;
pub mod stepper;
pub mod drive;

// Library
use defmt_rtt as _;
use panic_probe as _;
