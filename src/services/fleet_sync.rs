//! Fleet status synchronization
//!
//! Mirrors a booking status change onto the availability of its vehicle and
//! driver:
//!
//! | booking status | vehicle      | driver        |
//! |----------------|--------------|---------------|
//! | In Process     | On Booking   | Not Available |
//! | Completed      | Available    | Available     |
//! | anything else  | unchanged    | unchanged     |
//!
//! Both writes are best effort and independent of each other. Failures are
//! logged and reported, never returned as errors, and never undo the booking
//! update that triggered them.

use serde::Serialize;
use tracing::{error, info};

use crate::models::booking::{BookingSnapshot, BookingStatus};
use crate::models::driver::DriverStatus;
use crate::models::vehicle::VehicleAvailability;
use crate::repositories::fleet_repository::FleetStore;
use crate::utils::field::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetTargets {
    pub vehicle: VehicleAvailability,
    pub driver: DriverStatus,
}

pub fn targets_for(status: &BookingStatus) -> Option<FleetTargets> {
    match status {
        BookingStatus::InProcess => Some(FleetTargets {
            vehicle: VehicleAvailability::OnBooking,
            driver: DriverStatus::NotAvailable,
        }),
        BookingStatus::Completed => Some(FleetTargets {
            vehicle: VehicleAvailability::Available,
            driver: DriverStatus::Available,
        }),
        BookingStatus::Other(_) => None,
    }
}

/// Vehicle and driver a status change applies to
///
/// A vehicle named in the update wins, together with its freshly looked-up
/// driver. Otherwise the booking's current vehicle is used, with that
/// vehicle's assigned driver or the booking's own `driver_id`.
pub fn resolve_fleet_ids(
    prior: &BookingSnapshot,
    vehicle_update: &Field<i64>,
    assigned_driver: Option<i64>,
) -> (Option<i64>, Option<i64>) {
    match vehicle_update {
        Field::Absent => (
            prior.vehicle_id,
            prior.vehicle_assigned_driver_id.or(prior.driver_id),
        ),
        Field::Null => (None, None),
        Field::Value(vehicle_id) => (Some(*vehicle_id), assigned_driver),
    }
}

/// Outcome of a fleet synchronization
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSyncReport {
    pub vehicle_id: Option<i64>,
    pub vehicle_status: Option<VehicleAvailability>,
    pub vehicle_updated: bool,
    pub driver_id: Option<i64>,
    pub driver_status: Option<DriverStatus>,
    pub driver_updated: bool,
}

/// Applies the availability implied by `status`
pub async fn synchronize(
    fleet: &dyn FleetStore,
    status: &BookingStatus,
    vehicle_id: Option<i64>,
    driver_id: Option<i64>,
) -> FleetSyncReport {
    let mut report = FleetSyncReport {
        vehicle_id,
        driver_id,
        ..Default::default()
    };

    let Some(targets) = targets_for(status) else {
        return report;
    };

    if let Some(vehicle_id) = vehicle_id {
        match fleet.set_vehicle_availability(vehicle_id, &targets.vehicle).await {
            Ok(updated) => {
                report.vehicle_updated = updated;
                info!(vehicle_id, status = targets.vehicle.as_str(), "Vehicle availability updated");
            }
            Err(e) => {
                error!(vehicle_id, error = %e, "Error updating vehicle status");
            }
        }
        report.vehicle_status = Some(targets.vehicle);
    }

    if let Some(driver_id) = driver_id {
        match fleet.set_driver_status(driver_id, &targets.driver).await {
            Ok(updated) => {
                report.driver_updated = updated;
                info!(driver_id, status = targets.driver.as_str(), "Driver status updated");
            }
            Err(e) => {
                error!(driver_id, error = %e, "Error updating driver status");
            }
        }
        report.driver_status = Some(targets.driver);
    }

    report
}
