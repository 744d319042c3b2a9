//! Side button of the PineTime

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Timer};

/// Polling period, a press is recognized after two stable samples
const POLL_PERIOD: Duration = Duration::from_millis(10);

pub struct Button {
    /// Button detection pin (high/low)
    pin_button: Input<'static, P0_13>,
    /// Button enable pin
    pin_enable: Output<'static, P0_15>,
    debouncer: Debouncer<u8, Repeat2>,
}

impl Button {
    /// Configure button on boot
    pub fn init(pin_button: Input<'static, P0_13>, pin_enable: Output<'static, P0_15>) -> Self {
        Self {
            pin_button,
            pin_enable,
            debouncer: debounce_2(false),
        }
    }

    /// Sample the button once, return whether it was just pressed.
    async fn sample(&mut self) -> bool {
        // Enable button
        self.pin_enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_nanos(1)).await;

        let edge = self.debouncer.update(self.pin_button.is_high());

        // Button consumes around 34µA when P0.15 is left high.
        // To reduce current consumption, set it low most of the time.
        self.pin_enable.set_low();

        edge == Some(Edge::Rising)
    }

    /// Wait until the button is pressed.
    pub async fn wait_for_press(&mut self) {
        while !self.sample().await {
            Timer::after(POLL_PERIOD).await;
        }
    }
}
