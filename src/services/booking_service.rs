//! Booking lifecycle
//!
//! The two entry points of the booking core:
//!
//! - [`BookingService::apply_booking_update`] loads the prior snapshot,
//!   recalculates the derived amounts, persists them in one row update and
//!   then synchronizes the fleet when the status changed.
//! - [`BookingService::create_booking_from_tour`] seeds a new booking from its
//!   tour and assigns the sequence label.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::booking::{BookingStatus, NewBooking};
use crate::repositories::booking_repository::BookingStore;
use crate::repositories::fleet_repository::FleetStore;
use crate::services::booking_calculator::{self, recalculate, BookingChanges, BookingPatch};
use crate::services::fleet_sync::{self, FleetSyncReport};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::field::Field;
use crate::utils::money::Money;

/// Initial fields accepted when creating a booking
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub tour_id: i64,
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub vehicle_id: Field<i64>,
    pub actual_distance_km: Option<Money>,
    pub amount_paid: Option<Money>,
    pub actual_duration: Option<i32>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingUpdateOutcome {
    pub booking_id: i64,
    pub updated_fields: BookingChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet: Option<FleetSyncReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCreated {
    pub id: i64,
    pub name: String,
    pub booking: NewBooking,
}

/// Sequence label of a booking, e.g. `B NO -0042`
pub fn booking_label(id: i64) -> String {
    format!("B NO -{:04}", id)
}

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingStore>,
    fleet: Arc<dyn FleetStore>,
}

impl BookingService {
    pub fn new(bookings: Arc<dyn BookingStore>, fleet: Arc<dyn FleetStore>) -> Self {
        Self { bookings, fleet }
    }

    /// Driver of the vehicle named in an update, looked up before anything
    /// is written
    async fn lookup_driver(&self, vehicle: &Field<i64>) -> AppResult<Option<i64>> {
        match vehicle {
            Field::Value(vehicle_id) => self.fleet.assigned_driver(*vehicle_id).await.map_err(|e| {
                AppError::VehicleLookupFailed(format!(
                    "Error fetching assigned driver for vehicle {}: {}",
                    vehicle_id, e
                ))
            }),
            _ => Ok(None),
        }
    }

    pub async fn apply_booking_update(
        &self,
        booking_id: i64,
        patch: BookingPatch,
    ) -> AppResult<BookingUpdateOutcome> {
        if patch.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        let prior = self
            .bookings
            .find_snapshot(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", booking_id))?;

        let assigned_driver = self.lookup_driver(&patch.vehicle_id).await?;
        let changes = recalculate(&prior, &patch, assigned_driver)?;

        let applied = self
            .bookings
            .apply_changes(booking_id, prior.version, &changes)
            .await?;
        if !applied {
            warn!(booking_id, version = prior.version, "Booking modified concurrently");
            return Err(AppError::Conflict(format!(
                "Booking '{}' was modified by another request, reload and retry",
                booking_id
            )));
        }

        info!(
            booking_id,
            actual_total_amount = ?changes.actual_total_amount,
            outstanding_amount = ?changes.outstanding_amount,
            profit = ?changes.profit,
            "Booking details updated"
        );

        let fleet = match patch.status.value() {
            Some(status) => {
                let (vehicle_id, driver_id) =
                    fleet_sync::resolve_fleet_ids(&prior, &patch.vehicle_id, assigned_driver);
                Some(
                    fleet_sync::synchronize(
                        self.fleet.as_ref(),
                        &BookingStatus::parse(status),
                        vehicle_id,
                        driver_id,
                    )
                    .await,
                )
            }
            None => None,
        };

        Ok(BookingUpdateOutcome {
            booking_id,
            updated_fields: changes,
            fleet,
        })
    }

    pub async fn create_booking_from_tour(&self, draft: BookingDraft) -> AppResult<BookingCreated> {
        let seed = self
            .bookings
            .find_tour_seed(draft.tour_id)
            .await
            .map_err(|e| AppError::DependencyLookup(format!("Error fetching tour details: {}", e)))?
            .ok_or_else(|| not_found_error("Tour", draft.tour_id))?;

        let driver_id = self.lookup_driver(&draft.vehicle_id).await?;

        let baseline = Money::or_zero(seed.total_amount);
        let outstanding_amount = baseline.minus(draft.amount_paid.unwrap_or(Money::ZERO))?;

        // Profit is only known once costs are reported
        let profit = if draft.expenses.is_some() || draft.toll_tax.is_some() {
            Some(booking_calculator::profit(
                baseline,
                draft.expenses.unwrap_or(Money::ZERO),
                draft.toll_tax.unwrap_or(Money::ZERO),
            )?)
        } else {
            None
        };

        let booking = NewBooking {
            company_id: draft.company_id,
            lead_id: draft.lead_id,
            vehicle_id: draft.vehicle_id.value().copied(),
            driver_id,
            tour_id: draft.tour_id,
            booking_date: seed.start_date,
            booking_end_date: seed.end_date,
            booked_distance_km: seed.distance_km,
            total_amount: seed.total_amount,
            actual_total_amount: seed.total_amount,
            duration: seed.duration_days,
            type_of_tour: seed.type_of_tour,
            status: BookingStatus::InProcess.as_str().to_string(),
            actual_distance_km: draft.actual_distance_km,
            amount_paid: draft.amount_paid,
            actual_duration: draft.actual_duration,
            expenses: draft.expenses,
            toll_tax: draft.toll_tax,
            outstanding_amount,
            profit,
        };

        let id = self.bookings.insert_booking(&booking).await?;
        let name = booking_label(id);
        self.bookings.assign_name(id, &name).await?;

        info!(booking_id = id, name = %name, tour_id = draft.tour_id, "Booking created");

        Ok(BookingCreated { id, name, booking })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::CompanyRates;
    use crate::models::tour::TourSeed;
    use crate::services::test_support::{MemoryStore, StoredBooking};
    use chrono::NaiveDate;

    fn service(store: &Arc<MemoryStore>) -> BookingService {
        BookingService::new(store.clone(), store.clone())
    }

    /// Booking 1: Local, total 5000, booked 100 km, company rate 50,
    /// vehicle 5 driven by driver 9
    fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store.add_company(
            1,
            CompanyRates {
                localcharge: Some(Money::from(50)),
                outstationcharge: Some(Money::from(70)),
                lumpsumcharge: None,
            },
        );
        store.add_driver(9, "Not Available");
        store.add_driver(11, "Available");
        store.add_vehicle(5, Some(9), "On Booking");
        store.add_vehicle(6, Some(11), "Available");
        store.add_booking(
            1,
            StoredBooking {
                company_id: Some(1),
                vehicle_id: Some(5),
                driver_id: Some(9),
                status: Some("In Process".to_string()),
                type_of_tour: Some("Local".to_string()),
                booked_distance_km: Some(Money::from(100)),
                total_amount: Some(Money::from(5000)),
                actual_total_amount: Some(Money::from(5000)),
                outstanding_amount: Some(Money::from(5000)),
                ..Default::default()
            },
        );
        store
    }

    fn patch_distance(km: i64) -> BookingPatch {
        BookingPatch {
            actual_distance_km: Some(Money::from(km)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_sequence_keeps_amounts_consistent() {
        let store = seeded_store();
        let service = service(&store);

        service.apply_booking_update(1, patch_distance(120)).await.unwrap();
        assert_eq!(store.booking(1).unwrap().actual_total_amount, Some(Money::from(6000)));

        service
            .apply_booking_update(
                1,
                BookingPatch {
                    amount_paid: Some(Money::from(2000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.booking(1).unwrap().outstanding_amount, Some(Money::from(4000)));

        service
            .apply_booking_update(
                1,
                BookingPatch {
                    expenses: Some(Money::from(500)),
                    toll_tax: Some(Money::from(100)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.booking(1).unwrap().profit, Some(Money::from(5400)));

        service.apply_booking_update(1, patch_distance(80)).await.unwrap();
        let booking = store.booking(1).unwrap();
        assert_eq!(booking.actual_total_amount, Some(Money::from(5000)));
        assert_eq!(booking.outstanding_amount, Some(Money::from(3000)));
        assert_eq!(booking.profit, Some(Money::from(4400)));
        assert_eq!(booking.version, 4);
    }

    #[tokio::test]
    async fn test_completed_status_frees_fleet() {
        let store = seeded_store();

        let outcome = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    status: Field::Value("Completed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let fleet = outcome.fleet.unwrap();
        assert_eq!((fleet.vehicle_id, fleet.driver_id), (Some(5), Some(9)));
        assert_eq!(store.vehicle_status(5).as_deref(), Some("Available"));
        assert_eq!(store.driver_status(9).as_deref(), Some("Available"));
        assert_eq!(store.booking(1).unwrap().status.as_deref(), Some("Completed"));
    }

    #[tokio::test]
    async fn test_fleet_failure_does_not_fail_update() {
        let store = seeded_store();
        store.fail_vehicle_writes();
        store.fail_driver_writes();

        let outcome = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    status: Field::Value("Completed".to_string()),
                    amount_paid: Some(Money::from(1000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let fleet = outcome.fleet.unwrap();
        assert!(!fleet.vehicle_updated && !fleet.driver_updated);
        let booking = store.booking(1).unwrap();
        assert_eq!(booking.status.as_deref(), Some("Completed"));
        assert_eq!(booking.outstanding_amount, Some(Money::from(4000)));
        assert_eq!(store.vehicle_status(5).as_deref(), Some("On Booking"));
    }

    #[tokio::test]
    async fn test_vehicle_change_with_status_uses_new_vehicle_driver() {
        let store = seeded_store();

        let outcome = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    vehicle_id: Field::Value(6),
                    status: Field::Value("In Process".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let booking = store.booking(1).unwrap();
        assert_eq!(booking.vehicle_id, Some(6));
        assert_eq!(booking.driver_id, Some(11));
        assert_eq!(outcome.updated_fields.driver_id, Field::Value(11));
        assert_eq!(store.vehicle_status(6).as_deref(), Some("On Booking"));
        assert_eq!(store.driver_status(11).as_deref(), Some("Not Available"));
    }

    #[tokio::test]
    async fn test_vehicle_lookup_failure_persists_nothing() {
        let store = seeded_store();
        store.fail_vehicle_lookups();

        let err = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    vehicle_id: Field::Value(6),
                    amount_paid: Some(Money::from(100)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::VehicleLookupFailed(_)));
        assert_eq!(store.booking_writes(), 0);
        assert_eq!(store.booking(1).unwrap().amount_paid, None);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let store = seeded_store();
        let err = service(&store)
            .apply_booking_update(1, BookingPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoFieldsToUpdate));
    }

    #[tokio::test]
    async fn test_unknown_booking_is_not_found() {
        let store = seeded_store();
        let err = service(&store)
            .apply_booking_update(42, patch_distance(10))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_write_is_a_conflict() {
        let store = seeded_store();
        store.bump_version_on_next_write();

        let err = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    status: Field::Value("Completed".to_string()),
                    amount_paid: Some(Money::from(1000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.booking_writes(), 0);
        assert_eq!(store.fleet_writes(), 0);
        let booking = store.booking(1).unwrap();
        assert_eq!(booking.amount_paid, None);
        assert_eq!(booking.status.as_deref(), Some("In Process"));
        assert_eq!(store.vehicle_status(5).as_deref(), Some("On Booking"));
        assert_eq!(store.driver_status(9).as_deref(), Some("Not Available"));

        // A retry reads the new version and goes through
        service(&store).apply_booking_update(1, patch_distance(110)).await.unwrap();
        assert_eq!(store.booking(1).unwrap().actual_total_amount, Some(Money::from(5500)));
    }

    #[tokio::test]
    async fn test_out_of_range_distance_persists_nothing() {
        let store = seeded_store();

        let err = service(&store)
            .apply_booking_update(
                1,
                BookingPatch {
                    actual_distance_km: Some(Money::new(rust_decimal::Decimal::MAX)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidAmount(_)));
        assert_eq!(store.booking_writes(), 0);
        assert_eq!(store.booking(1).unwrap().actual_total_amount, Some(Money::from(5000)));
    }

    #[tokio::test]
    async fn test_create_seeds_from_tour() {
        let store = seeded_store();
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        store.add_tour(
            7,
            TourSeed {
                start_date: Some(start),
                end_date: Some(end),
                distance_km: Some(Money::from(50)),
                total_amount: Some(Money::from(4200)),
                duration_days: Some(3),
                type_of_tour: Some("Local".to_string()),
            },
        );
        store.add_booking(41, StoredBooking::default());

        let created = service(&store)
            .create_booking_from_tour(BookingDraft {
                tour_id: 7,
                company_id: Some(1),
                vehicle_id: Field::Value(6),
                amount_paid: Some(Money::from(1200)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.name, "B NO -0042");

        let booking = store.booking(42).unwrap();
        assert_eq!(booking.name.as_deref(), Some("B NO -0042"));
        assert_eq!(booking.booking_date, Some(start));
        assert_eq!(booking.booking_end_date, Some(end));
        assert_eq!(booking.booked_distance_km, Some(Money::from(50)));
        assert_eq!(booking.total_amount, Some(Money::from(4200)));
        assert_eq!(booking.actual_total_amount, Some(Money::from(4200)));
        assert_eq!(booking.duration, Some(3));
        assert_eq!(booking.type_of_tour.as_deref(), Some("Local"));
        assert_eq!(booking.status.as_deref(), Some("In Process"));
        assert_eq!(booking.driver_id, Some(11));
        assert_eq!(booking.outstanding_amount, Some(Money::from(3000)));
        assert_eq!(booking.profit, None);
    }

    #[tokio::test]
    async fn test_create_profit_only_with_costs() {
        let store = seeded_store();
        store.add_tour(
            7,
            TourSeed {
                total_amount: Some(Money::from(4200)),
                ..Default::default()
            },
        );

        let created = service(&store)
            .create_booking_from_tour(BookingDraft {
                tour_id: 7,
                toll_tax: Some(Money::from(200)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.booking.profit, Some(Money::from(4000)));
        assert_eq!(created.booking.outstanding_amount, Money::from(4200));
        assert_eq!(created.booking.driver_id, None);
    }

    #[tokio::test]
    async fn test_create_from_unknown_tour() {
        let store = seeded_store();
        let err = service(&store)
            .create_booking_from_tour(BookingDraft {
                tour_id: 404,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.booking_writes(), 0);
    }

    #[test]
    fn test_booking_label() {
        assert_eq!(booking_label(42), "B NO -0042");
        assert_eq!(booking_label(7), "B NO -0007");
        assert_eq!(booking_label(12345), "B NO -12345");
    }
}
