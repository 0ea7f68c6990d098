//! midi-dmx-bridge-fw
//!
//! MIDI Control Change → DMX bridge firmware for the Raspberry Pi Pico 2.
//! Wires the `midi-dmx-bridge` library to the board:
//!
//! 1. MIDI bytes arrive on UART1 RX at 31 250 baud and are buffered by the
//!    UART interrupt.
//! 2. Every loop iteration the bridge reads at most one Control Change for
//!    the configured channel and updates the dynamic scene.
//! 3. The gain potentiometer and the scene switch are sampled between
//!    listen cycles.
//! 4. Every visible DMX change is reported through `on_dmx_change`.
//!
//! No DMX transmitter is driven in this stage; changes are logged over RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{self, BufferedInterruptHandler, BufferedUartRx};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use midi_dmx_bridge::constants::{ANALOG_READ_BITS, MIDI_BAUD_RATE};
use midi_dmx_bridge::serial::{DelaySleep, IoByteSource};
use midi_dmx_bridge::{BridgeConfig, MidiDmxBridge, Rgb, RgbChannels};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// UART1 fills the RX ring buffer from its interrupt.
bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Ring buffer behind the UART RX interrupt. At 31 250 baud this holds
/// roughly 80 ms of continuous MIDI.
static RX_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The RP2350 ADC resolves 12 bits; the bridge expects 10.
const ADC_SHIFT: u32 = 12 - ANALOG_READ_BITS as u32;

/// Sample the controls once every this many listen cycles.
const CONTROL_POLL_CYCLES: u32 = 10;

/// Fixture channels lit by the static scene.
const STATIC_RED: &[u8] = &[1, 4, 7, 10];
const STATIC_GREEN: &[u8] = &[2, 5, 8, 11];
const STATIC_BLUE: &[u8] = &[3, 6, 9, 12];
const STATIC_COLOR: Rgb = Rgb::new(255, 120, 20);

/// Receives every visible DMX change from the scene engine.
fn on_dmx_change(channel: u8, value: u8) {
    debug!("DMX {=u8} -> {=u8}", channel, value);
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("midi-dmx-bridge-fw starting");

    // ── Pin assignments ──────────────────────────────────────────────────
    // MIDI_RX → GP5   (p.PIN_5)   UART1 RX
    // GAIN    → GP26  (p.PIN_26)  ADC0, potentiometer wiper
    // SCENE   → GP15  (p.PIN_15)  active-low, pull-up enabled; low = static
    // ────────────────────────────────────────────────────────────────────

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = MIDI_BAUD_RATE;

    let rx_buffer = RX_BUFFER.init([0; 256]);
    let rx = BufferedUartRx::new(p.UART1, Irqs, p.PIN_5, rx_buffer, uart_config);
    let serial: IoByteSource<_> = IoByteSource::new(rx);

    let mut adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let mut gain_pot = Channel::new_pin(p.PIN_26, Pull::None);
    let scene_switch = Input::new(p.PIN_15, Pull::Up);

    let mut bridge = MidiDmxBridge::with_config(
        BridgeConfig::default(),
        on_dmx_change,
        serial,
        DelaySleep::new(Delay),
    );
    bridge.begin();

    let channels = RgbChannels::new(STATIC_RED, STATIC_GREEN, STATIC_BLUE);
    bridge.set_static_scene(&channels, STATIC_COLOR);

    // ── Listen loop ──────────────────────────────────────────────────────

    let mut cycle: u32 = 0;
    loop {
        if cycle % CONTROL_POLL_CYCLES == 0 {
            match adc.blocking_read(&mut gain_pot) {
                Ok(raw) => bridge.set_attenuation(raw >> ADC_SHIFT),
                Err(_) => warn!("Gain potentiometer read failed"),
            }

            if scene_switch.is_low() {
                bridge.switch_to_static_scene();
            } else {
                bridge.switch_to_dynamic_scene();
            }
        }
        cycle = cycle.wrapping_add(1);

        bridge.listen();
    }
}
