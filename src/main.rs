//! Badge firmware entry point.
//!
//! Brings up the peripherals that do not depend on the state machine
//! (button, LED strip, console), spawns their tasks, then hands the display
//! bus and the SoftDevice to the board and runs the control loop forever.

#![no_std]
#![no_main]

use badge::board::NrfBoard;
use badge::ble::server;
use badge::console::uart::console_task;
use badge::led::{LedColor, LedOutput, StatusLed};
use badge::ui::buttons::button_task;
use badge::ui::display::{scroll_task, DisplaySlot};
use badge::{ControlLoop, DisplayJob, EventQueue};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::{bind_interrupts, peripherals, spim, twim, uarte};
use embassy_sync::signal::Signal;
use nrf_softdevice::Softdevice;
use ws2812_spi::Ws2812;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static EVENTS: EventQueue = EventQueue::new();
static DISPLAY_JOB: DisplayJob = DisplayJob::new();
static DISPLAY_SLOT: DisplaySlot = Signal::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Makerville badge starting");

    // SoftDevice reserves priorities 0, 1 and 4.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    // LED strip: white until the console says otherwise.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M2;
    let spi = spim::Spim::new_txonly_nosck(p.SPI3, Irqs, p.P0_13, spi_config);
    let mut led = StatusLed::new(Ws2812::new(spi));
    led.set_color(LedColor::White);

    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);

    let button = Input::new(p.P0_11, Pull::Up);

    let sd = Softdevice::enable(&server::softdevice_config());

    unwrap!(spawner.spawn(button_task(button, &EVENTS)));
    unwrap!(spawner.spawn(scroll_task(&DISPLAY_SLOT, &DISPLAY_JOB)));
    unwrap!(spawner.spawn(console_task(uart, led)));

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);

    let board = NrfBoard::new(spawner, sd, i2c, &DISPLAY_SLOT, &EVENTS, &DISPLAY_JOB);
    ControlLoop::new(board, &EVENTS, &DISPLAY_JOB).run().await
}
