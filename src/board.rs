//! nRF52840 badge hardware behind the [`Board`] trait.
//!
//! Owns the peripherals the initial state brings up. Each subsystem's
//! resources are handed over on first bring-up; a second attempt finds
//! them gone and fails.

use embassy_executor::Spawner;
use embassy_nrf::peripherals;
use embassy_nrf::twim::Twim;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

use crate::ble::server::{self, Server};
use crate::error::{Error, Subsystem};
use crate::event_queue::EventQueue;
use crate::state_machine::Board;
use crate::ui::display::{self, DisplaySlot};
use crate::ui::display_job::DisplayJob;

static SERVER: StaticCell<Server> = StaticCell::new();

pub struct NrfBoard {
    spawner: Spawner,
    sd: Option<&'static mut Softdevice>,
    i2c: Option<Twim<'static, peripherals::TWISPI0>>,
    display_slot: &'static DisplaySlot,
    events: &'static EventQueue,
    display: &'static DisplayJob,
}

impl NrfBoard {
    pub fn new(
        spawner: Spawner,
        sd: &'static mut Softdevice,
        i2c: Twim<'static, peripherals::TWISPI0>,
        display_slot: &'static DisplaySlot,
        events: &'static EventQueue,
        display: &'static DisplayJob,
    ) -> Self {
        Self {
            spawner,
            sd: Some(sd),
            i2c: Some(i2c),
            display_slot,
            events,
            display,
        }
    }

    fn bring_up_display(&mut self) -> Result<(), Error> {
        let i2c = self.i2c.take().ok_or(Error::Bringup(Subsystem::Display))?;
        let oled = display::init(i2c)?;
        self.display_slot.signal(oled);
        info!("Display initialized");
        Ok(())
    }

    fn bring_up_wireless(&mut self) -> Result<(), Error> {
        let failed = Error::Bringup(Subsystem::Wireless);
        let sd = self.sd.take().ok_or(failed)?;

        let server = server::register(sd).map_err(|e| {
            error!("GATT registration failed: {:?}", e);
            failed
        })?;
        let server: &'static Server = SERVER.init(server);
        let sd: &'static Softdevice = sd;

        self.spawner
            .spawn(server::softdevice_task(sd))
            .map_err(|_| failed)?;
        self.spawner
            .spawn(server::ble_task(sd, server, self.events, self.display))
            .map_err(|_| failed)?;
        Ok(())
    }
}

impl Board for NrfBoard {
    fn bring_up(&mut self, subsystem: Subsystem) -> Result<(), Error> {
        match subsystem {
            Subsystem::Display => self.bring_up_display(),
            Subsystem::Wireless => self.bring_up_wireless(),
        }
    }
}
