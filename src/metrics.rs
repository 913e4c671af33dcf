//! Derived productivity metrics.
//!
//! Every stage rounds to two decimals and the next stage consumes the rounded
//! value, so the numbers stored in history are exactly the numbers shown on the
//! calculator forms.

use thiserror::Error;

pub const CARTONS_PER_PALLET: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("Remaining cannot exceed total pallets!")]
    RemainingExceedsTotal,

    #[error("Hours worked cannot be zero!")]
    ZeroHoursWorked,

    #[error("Hours hanging cannot be zero!")]
    ZeroHoursHanging,

    #[error("{0} cannot be negative!")]
    NegativeInput(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

/// Raw counts as typed into the three calculator forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInputs {
    pub carried_over: f64,
    pub delivered: f64,
    pub remaining: f64,
    pub hours_worked: f64,
    pub z_racks: f64,
    pub hours_hanging: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub pallets_processed: f64,
    pub cartons_processed: f64,
    pub cph: f64,
    pub zph: f64,
}

pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

fn finite(value: f64, field: &'static str) -> Result<f64, MetricError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricError::NotANumber(field))
    }
}

/// Rounds a result and rejects it if it overflowed.
pub fn bounded(value: f64, field: &'static str) -> Result<f64, MetricError> {
    let rounded = round2(value);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(MetricError::OutOfRange(field))
    }
}

pub fn pallets_processed(carried_over: f64, delivered: f64, remaining: f64) -> Result<f64, MetricError> {
    let carried_over = finite(carried_over, "Carried-over")?.max(0.0);
    let delivered = finite(delivered, "Delivered")?.max(0.0);
    let remaining = finite(remaining, "Remaining pallets")?.max(0.0);

    if remaining > carried_over + delivered {
        return Err(MetricError::RemainingExceedsTotal);
    }

    bounded(carried_over + delivered - remaining, "Pallets processed")
}

pub fn cartons_processed(pallets: f64) -> Result<f64, MetricError> {
    bounded(finite(pallets, "Pallets processed")? * CARTONS_PER_PALLET, "Cartons processed")
}

pub fn cartons_per_hour(cartons: f64, hours_worked: f64) -> Result<f64, MetricError> {
    let cartons = finite(cartons, "Cartons processed")?;
    let hours = finite(hours_worked, "Hours worked")?;
    if hours == 0.0 {
        return Err(MetricError::ZeroHoursWorked);
    }
    if hours < 0.0 {
        return Err(MetricError::NegativeInput("Hours worked"));
    }
    if cartons < 0.0 {
        return Err(MetricError::NegativeInput("Cartons processed"));
    }

    bounded(cartons / hours, "Cartons per hour")
}

pub fn zracks_per_hour(z_racks: f64, hours_hanging: f64) -> Result<f64, MetricError> {
    let racks = finite(z_racks, "Z-racks filled")?;
    let hours = finite(hours_hanging, "Hours hanging")?;
    if hours == 0.0 {
        return Err(MetricError::ZeroHoursHanging);
    }
    if hours < 0.0 {
        return Err(MetricError::NegativeInput("Hours hanging"));
    }
    if racks < 0.0 {
        return Err(MetricError::NegativeInput("Z-racks filled"));
    }

    bounded(racks / hours, "Z-racks per hour")
}

pub fn derive(raw: &RawInputs) -> Result<Derived, MetricError> {
    let pallets_processed = pallets_processed(raw.carried_over, raw.delivered, raw.remaining)?;
    let cartons_processed = cartons_processed(pallets_processed)?;
    let cph = cartons_per_hour(cartons_processed, raw.hours_worked)?;
    let zph = zracks_per_hour(raw.z_racks, raw.hours_hanging)?;

    Ok(Derived {
        pallets_processed,
        cartons_processed,
        cph,
        zph,
    })
}
