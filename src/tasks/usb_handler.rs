/*
* USB Handler
*  - USB CDC-ACM carries both the log output and the command lines
*/

// Resources
use crate::board::COMMAND_CHANNEL;

// Library
use diffdrive::resources::Command;
use diffdrive::resources::LineAssembler;
use diffdrive::resources::Shared;
use diffdrive::Result;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb_logger::ReceiverHandler;
use heapless::Vec;

/* --------------------------- Code -------------------------- */
const LINES_PER_PACKET: usize = 8;

struct UsbHandler {
    lines: Shared<LineAssembler>,
}

impl ReceiverHandler for UsbHandler {
    async fn handle_data(&self, data: &[u8]) {
        let mut results: Vec<Result<Command>, LINES_PER_PACKET> = Vec::new();
        let mut dropped = 0;
        self.lines.lock(|lines| {
            lines.feed(data, |result| {
                if results.push(result).is_err() {
                    dropped += 1;
                }
            })
        });
        if dropped > 0 {
            log::warn!("{} lines over the per-packet limit dropped", dropped);
        }

        for result in results {
            match result {
                Ok(command) => {
                    if COMMAND_CHANNEL.try_send(command).is_err() {
                        log::warn!("command queue full, dropped");
                    }
                },
                Err(err) => log::warn!("rejected command: {}", err),
            }
        }
    }

    fn new() -> Self {
        Self {
            lines: Shared::new(LineAssembler::new()),
        }
    }
}

#[embassy_executor::task]
pub async fn usb_logger_task(driver: Driver<'static, USB>) {
    embassy_usb_logger::run!(1024, log::LevelFilter::Info, driver, UsbHandler);
}
