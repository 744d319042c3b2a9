#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

use core::cell::Cell;

// Device
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{
    blocking_mutex::{raw::ThreadModeRawMutex, Mutex},
    channel::Channel,
    signal::Signal,
};
use embassy_time::{Duration, Instant, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::BatteryStatus,
    button::Button,
    display::{self, Lcd},
};
use system::config::{
    SystemConfig, ACTIVE_BRIGHTNESS, AMBIENT_BRIGHTNESS, AMBIENT_TIMEOUT, BATTERY_POLL_PERIOD,
    TIMEZONE,
};

// Watch face
use chrono::{FixedOffset, Timelike};
use pinetime_watchface::{
    system::{time::TimeReference, BatteryEvent, BatteryInfo, BatterySource, ClockSource, WallClock},
    ui::FaceCanvas,
    Event, Visibility, WatchFace,
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

type Face = WatchFace<WallClock, SharedBattery, FaceCanvas<Lcd>>;

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, 8> = Channel::new();
static BUTTON_PRESSED: Signal<ThreadModeRawMutex, ()> = Signal::new();
static BATTERY: Mutex<ThreadModeRawMutex, Cell<BatteryInfo>> = Mutex::new(Cell::new(BatteryInfo {
    charging: false,
    percent: 0,
}));

/// Battery source reading the state published by `update_battery_status`
struct SharedBattery;

impl BatterySource for SharedBattery {
    fn level(&self) -> f32 {
        BATTERY.lock(|info| info.get().level())
    }
}

/// Wait for debounced button presses.
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        button.wait_for_press().await;
        defmt::debug!("Button pressed");
        BUTTON_PRESSED.signal(());
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: BatteryStatus) {
    loop {
        match battery.update().await {
            Ok(changes) if changes.any() => {
                let info = battery.info();
                defmt::info!(
                    "Battery status: {}% ({})",
                    info.percent,
                    if info.charging {
                        "charging"
                    } else {
                        "discharging"
                    }
                );
                BATTERY.lock(|cell| cell.set(info));

                if changes.charging {
                    EVENTS
                        .send(Event::Battery(BatteryEvent::ChargingChange))
                        .await;
                }
                if changes.level {
                    EVENTS.send(Event::Battery(BatteryEvent::LevelChange)).await;
                }
            }
            Ok(_) => {}
            Err(err) => defmt::warn!("Battery measurement failed: {}", err),
        }

        // Re-schedule the timer interrupt
        Timer::after(BATTERY_POLL_PERIOD).await;
    }
}

/// Time left until the next full minute of `clock`
fn until_next_minute(clock: &WallClock) -> Duration {
    let now = clock.local_time(Instant::now());
    let millis = now.second().min(59) as u64 * 1_000 + (now.nanosecond() / 1_000_000).min(999) as u64;
    Duration::from_millis(60_000 - millis)
}

/// Dim into ambient mode after inactivity, wake up on button press.
///
/// While ambient, a heartbeat is sent on every full minute.
#[embassy_executor::task(pool_size = 1)]
async fn manage_power(mut backlight: Backlight, clock: WallClock) {
    let mut ambient = false;
    loop {
        let timeout = if ambient {
            until_next_minute(&clock)
        } else {
            AMBIENT_TIMEOUT
        };

        match select(BUTTON_PRESSED.wait(), Timer::after(timeout)).await {
            Either::First(()) if ambient => {
                defmt::info!("Waking up");
                ambient = false;
                if let Err(err) = backlight.set(ACTIVE_BRIGHTNESS) {
                    defmt::warn!("Backlight: {}", err);
                }
                EVENTS.send(Event::AmbientModeChanged(false)).await;
                EVENTS
                    .send(Event::VisibilityChanged(Visibility::Visible))
                    .await;
            }
            // Activity while active restarts the timeout
            Either::First(()) => {}
            Either::Second(()) if ambient => EVENTS.send(Event::TimeTick).await,
            Either::Second(()) => {
                defmt::info!("Inactive, dimming");
                ambient = true;
                if let Err(err) = backlight.set(AMBIENT_BRIGHTNESS) {
                    defmt::warn!("Backlight: {}", err);
                }
                EVENTS.send(Event::AmbientModeChanged(true)).await;
            }
        }
    }
}

/// Drive the watch face: one event or due deadline at a time.
#[embassy_executor::task(pool_size = 1)]
async fn run_watchface(mut face: Face) {
    if face.start(Instant::now()).is_err() {
        defmt::warn!("Watch face start-up render failed");
    }

    loop {
        let deadline = face.next_deadline().unwrap_or(Instant::MAX);
        let result = match select(EVENTS.receive(), Timer::at(deadline)).await {
            Either::First(event) => face.handle(event, Instant::now()),
            Either::Second(()) => face.poll(Instant::now()),
        };
        if result.is_err() {
            defmt::warn!("Watch face render failed");
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        ACTIVE_BRIGHTNESS,
    ));

    // Initalize Battery
    let battery = unwrap!(BatteryStatus::init(Input::new(p.P0_12, Pull::None), saadc).await);
    BATTERY.lock(|cell| cell.set(battery.info()));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let lcd = unwrap!(display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Wall clock starts at the build time
    let reference = unwrap!(TimeReference::from_timestamp(UTC_EPOCH, Instant::now()));
    let clock = WallClock::new(reference, unwrap!(FixedOffset::east_opt(TIMEZONE)));

    let face = WatchFace::new(
        clock,
        SharedBattery,
        FaceCanvas::new(lcd),
        SystemConfig::face(),
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(manage_power(backlight, clock)));
    unwrap!(spawner.spawn(run_watchface(face)));
}
