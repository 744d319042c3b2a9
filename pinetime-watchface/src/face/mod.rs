//! Watch face controller
//!
//! `WatchFace` owns the display surface and both host-managed callbacks: the
//! repeating time refresh (alive only in active mode) and the one-shot date
//! refresh. Callbacks are deadlines; the host awaits `next_deadline()` and
//! calls `poll()`, and delivers everything else through `handle()`. Every
//! render reads absolute time from the clock, so late or missed callbacks
//! correct themselves on the next one.

mod date;
mod timer;

use chrono::{Datelike, Timelike, Weekday};
use embassy_time::{Duration, Instant};

use crate::{
    config::FaceConfig,
    error::Error,
    system::{BatteryEvent, BatterySource, ClockSource},
    ui::{
        format::{battery_gauge, twelve_hour, zero_pad},
        locale::month_name,
        Surface,
    },
};

pub use date::{millis_until_midnight, next_delay, PendingDateRefresh, PreviousDay};
pub use timer::Interval;

/// Rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Full brightness, time refreshed every interval
    Active,
    /// Low power, time refreshed by the host's heartbeat only
    Ambient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Notifications delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Low power heartbeat, sent while ambient
    TimeTick,
    /// Ambient mode entered (`true`) or left (`false`)
    AmbientModeChanged(bool),
    /// Screen turned on or off
    VisibilityChanged(Visibility),
    /// Clock offset changed
    TimezoneChanged,
    /// Battery source reported a change
    Battery(BatteryEvent),
}

type Result<T, E> = core::result::Result<T, Error<E>>;

/// The digital watch face
pub struct WatchFace<C, B, S> {
    clock: C,
    battery: B,
    surface: S,
    config: FaceConfig,
    mode: Mode,
    date_refresh: Option<PendingDateRefresh>,
    time_refresh: Option<Interval>,
}

impl<C, B, S> WatchFace<C, B, S>
where
    C: ClockSource,
    B: BatterySource,
    S: Surface,
{
    pub fn new(clock: C, battery: B, surface: S, config: FaceConfig) -> Self {
        Self {
            clock,
            battery,
            surface,
            config,
            mode: Mode::Active,
            date_refresh: None,
            time_refresh: None,
        }
    }

    /// Enter active mode and draw the date and battery gauge.
    ///
    /// The first time render happens on the first interval tick.
    pub fn start(&mut self, now: Instant) -> Result<(), S::Error> {
        self.enter_active(now)?;
        self.refresh_date(PreviousDay::Force, now)?;
        self.render_battery()
    }

    /// React to a host notification.
    pub fn handle(&mut self, event: Event, now: Instant) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Watch face event: {}", event);

        match event {
            Event::TimeTick | Event::AmbientModeChanged(true) => self.enter_ambient(now),
            Event::AmbientModeChanged(false) => self.enter_active(now),
            Event::VisibilityChanged(Visibility::Visible) | Event::TimezoneChanged => {
                self.render_now(now)
            }
            Event::VisibilityChanged(Visibility::Hidden) => Ok(()),
            Event::Battery(_) => self.render_battery(),
        }
    }

    /// Run every callback due at `now`, earliest deadline first.
    pub fn poll(&mut self, now: Instant) -> Result<(), S::Error> {
        loop {
            let date_due = self
                .date_refresh
                .map(|pending| pending.deadline)
                .filter(|deadline| *deadline <= now);
            let time_due = self
                .time_refresh
                .map(|interval| interval.deadline())
                .filter(|deadline| *deadline <= now);

            match (date_due, time_due) {
                (None, None) => return Ok(()),
                (Some(date), Some(time)) if time < date => self.tick_time(now)?,
                (Some(_), _) => {
                    if let Some(pending) = self.date_refresh.take() {
                        self.refresh_date(PreviousDay::Observed(pending.previous), now)?;
                    }
                }
                (None, Some(_)) => self.tick_time(now)?,
            }
        }
    }

    /// Earliest pending callback
    pub fn next_deadline(&self) -> Option<Instant> {
        let date = self.date_refresh.map(|pending| pending.deadline);
        let time = self.time_refresh.map(|interval| interval.deadline());
        match (date, time) {
            (Some(date), Some(time)) => Some(date.min(time)),
            (date, time) => date.or(time),
        }
    }

    /// Re-render time and date immediately, rescheduling the date refresh
    /// relative to the current day.
    pub fn render_now(&mut self, now: Instant) -> Result<(), S::Error> {
        self.render_time(now)?;
        self.refresh_date(PreviousDay::Force, now)
    }

    /// Write the date labels and arm the next date refresh.
    ///
    /// Replaces any pending date refresh.
    pub fn refresh_date(&mut self, previous: PreviousDay, now: Instant) -> Result<(), S::Error> {
        let local = self.clock.local_time(now);
        let delay = next_delay(previous, &local, &self.config);
        self.arm_date_refresh(now, delay, local.weekday());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Date {} {=u32}, next refresh in {=u64} ms",
            crate::ui::locale::short_day(local.weekday()),
            local.day(),
            delay.as_millis()
        );

        let mut buf = [0u8; 2];
        self.surface.set_day(zero_pad(local.day(), &mut buf))?;
        let month = month_name(local.month0(), self.config.month_style)
            .ok_or(Error::InvalidMonth(local.month0()))?;
        self.surface.set_month(month)?;
        Ok(())
    }

    /// Write hour and minute labels.
    pub fn render_time(&mut self, now: Instant) -> Result<(), S::Error> {
        let local = self.clock.local_time(now);
        let mut buf = [0u8; 2];
        self.surface
            .set_hours(zero_pad(twelve_hour(local.hour()), &mut buf))?;
        self.surface.set_minutes(zero_pad(local.minute(), &mut buf))?;
        Ok(())
    }

    /// Write the battery gauge from the current level.
    pub fn render_battery(&mut self) -> Result<(), S::Error> {
        let gauge = battery_gauge(self.battery.level(), self.config.gauge_scale);
        self.surface.set_battery_gauge(gauge)?;
        Ok(())
    }

    fn enter_active(&mut self, now: Instant) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("Entering active mode");

        self.mode = Mode::Active;
        self.time_refresh = Some(Interval::starting_at(
            now,
            self.config.time_refresh_interval,
        ));
        self.surface.set_background(true)?;
        Ok(())
    }

    fn enter_ambient(&mut self, now: Instant) -> Result<(), S::Error> {
        if self.mode == Mode::Active {
            #[cfg(feature = "defmt")]
            defmt::info!("Entering ambient mode");
        }

        self.mode = Mode::Ambient;
        self.time_refresh = None;
        self.surface.set_background(false)?;
        self.render_time(now)
    }

    fn tick_time(&mut self, now: Instant) -> Result<(), S::Error> {
        let due = self
            .time_refresh
            .as_mut()
            .map_or(false, |interval| interval.poll(now));
        if due {
            self.render_time(now)?;
        }
        Ok(())
    }

    fn arm_date_refresh(&mut self, now: Instant, delay: Duration, today: Weekday) {
        // Never arm in the past, the refresh would spin
        let delay = delay.max(Duration::from_millis(1));
        self.date_refresh = Some(PendingDateRefresh {
            deadline: now + delay,
            previous: today,
        });
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn pending_date_refresh(&self) -> Option<PendingDateRefresh> {
        self.date_refresh
    }

    pub fn time_refresh(&self) -> Option<Interval> {
        self.time_refresh
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Clock access, e.g. to change the timezone before sending
    /// `Event::TimezoneChanged`
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn battery(&self) -> &B {
        &self.battery
    }

    pub fn battery_mut(&mut self) -> &mut B {
        &mut self.battery
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
