//! SoftDevice GATT server and advertising loop.
//!
//! Registers the badge service on bring-up, then advertises, serves one
//! peer at a time and re-advertises after each disconnect.

use core::convert::Infallible;
use core::future::pending;
use core::mem;

use crate::ble::{advertising_data, scan_response_data, BadgeCharacteristic, Link};
use crate::config::{
    BADGE_CHARACTERISTIC_LEN, BADGE_SERVICE_UUID, BLE_ADV_INTERVAL, BLE_ADV_RESTART_DELAY_MS,
    BLE_DEVICE_NAME,
};
use crate::error::Error;
use crate::event_queue::EventQueue;
use crate::ui::display_job::DisplayJob;
use embassy_time::{Duration, Timer};
use heapless::Vec;
use nrf_softdevice::ble::{gatt_server, peripheral};
use nrf_softdevice::{raw, Softdevice};

static ADV_DATA: [u8; 5 + BLE_DEVICE_NAME.len()] = advertising_data(BLE_DEVICE_NAME);
static SCAN_DATA: [u8; 4] = scan_response_data(BADGE_SERVICE_UUID);

#[nrf_softdevice::gatt_service(uuid = "1234")]
pub struct BadgeService {
    #[characteristic(uuid = "5678", read, write)]
    text: Vec<u8, BADGE_CHARACTERISTIC_LEN>,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    badge: BadgeService,
}

/// SoftDevice configuration for a single-link peripheral.
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 247 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            // SAFETY: all-zero is "no access", the SoftDevice default.
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Register the badge service and publish the greeting as its value.
pub fn register(sd: &mut Softdevice) -> Result<Server, gatt_server::RegisterError> {
    let server = Server::new(sd)?;
    publish(&server, &BadgeCharacteristic::new());
    Ok(server)
}

/// Make the committed text the value peers read back.
fn publish(server: &Server, characteristic: &BadgeCharacteristic) {
    if server.badge.text_set(&characteristic.attribute_value()).is_err() {
        warn!("Could not publish badge text");
    }
}

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise, serve one connection, repeat.
///
/// A failed advertising start is reported once as `Event::WirelessError`,
/// after which the task parks for good.
#[embassy_executor::task]
pub async fn ble_task(
    sd: &'static Softdevice,
    server: &'static Server,
    events: &'static EventQueue,
    display: &'static DisplayJob,
) -> ! {
    info!("Bluetooth initialized");
    let mut characteristic = BadgeCharacteristic::new();
    let mut link = Link::new();

    loop {
        if !link.should_advertise() {
            warn!("Advertising stopped ({})", link.state());
            match pending::<Infallible>().await {}
        }

        Timer::after(Duration::from_millis(BLE_ADV_RESTART_DELAY_MS)).await;

        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let config = peripheral::Config {
            interval: BLE_ADV_INTERVAL,
            ..Default::default()
        };

        info!("Advertising started");
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Advertising/connection failed: {:?}", e);
                if let Some(event) = link.on_advertise_failed() {
                    events.emit(event);
                }
                continue;
            }
        };
        link.on_connected();
        info!("Connected");

        let reason = gatt_server::run(&conn, server, |e| match e {
            ServerEvent::Badge(BadgeServiceEvent::TextWrite(value)) => {
                match characteristic.write(0, &value).map_err(Error::from) {
                    Ok(text) => {
                        info!("Received via BLE: {}", text);
                        display.request_text(text);
                    }
                    Err(e) => warn!("Rejected badge write: {}", e),
                }
                // The SoftDevice already stored the raw bytes.
                publish(server, &characteristic);
            }
        })
        .await;

        link.on_disconnected();
        info!("Disconnected: {:?}", reason);
    }
}
