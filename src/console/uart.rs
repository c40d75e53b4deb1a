//! UART transport for the console.

use core::fmt::Write;

use embassy_nrf::peripherals;
use embassy_nrf::spim::Spim;
use embassy_nrf::uarte::Uarte;
use heapless::String;
use ws2812_spi::Ws2812;

use super::Console;
use crate::led::StatusLed;

/// The strip as wired on the badge.
pub type BadgeLed = StatusLed<Ws2812<Spim<'static, peripherals::SPI3>>>;

const PROMPT: &str = "> ";

#[embassy_executor::task]
pub async fn console_task(mut uart: Uarte<'static, peripherals::UARTE0>, mut led: BadgeLed) -> ! {
    let mut console = Console::new();
    let mut out: String<256> = String::new();
    let mut byte = [0u8; 1];

    let _ = uart.write(PROMPT.as_bytes()).await;
    info!("Console started");

    loop {
        if let Err(e) = uart.read(&mut byte).await {
            warn!("Console read failed: {}", e);
            continue;
        }

        // Echo
        let _ = uart.write(&byte).await;

        let Some(result) = console.feed(byte[0], &mut out, &mut led) else {
            continue;
        };
        if let Err(e) = result {
            let _ = writeln!(out, "Error {}", e);
        }
        let _ = out.push_str(PROMPT);

        let _ = uart.write(b"\r\n").await;
        if uart.write(out.as_bytes()).await.is_err() {
            warn!("Console write failed");
        }
        out.clear();
    }
}
