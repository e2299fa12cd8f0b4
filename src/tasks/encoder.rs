/*
* Encoder Task
*  - One task per channel, woken on every edge
*  - The level is read right after the wake-up; a bounce in between is absorbed
*    by the velocity loop
*/

// Library
use diffdrive::devices::quadrature::EncoderChannel;
use diffdrive::devices::quadrature::QuadratureDecoder;
use embassy_rp::gpio::Input;

/* --------------------------- Code -------------------------- */
#[embassy_executor::task(pool_size = 4)]
pub async fn encoder_task(mut pin: Input<'static>, channel: EncoderChannel, decoder: &'static QuadratureDecoder) {
    loop {
        pin.wait_for_any_edge().await;
        decoder.on_edge(channel, pin.is_high());
    }
}
