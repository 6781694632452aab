//! In-memory stores for service tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::booking::{BookingSnapshot, NewBooking};
use crate::models::company::CompanyRates;
use crate::models::driver::DriverStatus;
use crate::models::tour::TourSeed;
use crate::models::vehicle::VehicleAvailability;
use crate::repositories::booking_repository::BookingStore;
use crate::repositories::company_repository::RateStore;
use crate::repositories::fleet_repository::FleetStore;
use crate::services::booking_calculator::BookingChanges;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::field::Field;
use crate::utils::money::Money;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredBooking {
    pub name: Option<String>,
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub tour_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub status: Option<String>,
    pub type_of_tour: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_end_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    pub actual_duration: Option<i32>,
    pub booked_distance_km: Option<Money>,
    pub total_amount: Option<Money>,
    pub actual_distance_km: Option<Money>,
    pub actual_total_amount: Option<Money>,
    pub amount_paid: Option<Money>,
    pub outstanding_amount: Option<Money>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
    pub profit: Option<Money>,
    pub version: i32,
}

impl From<&NewBooking> for StoredBooking {
    fn from(b: &NewBooking) -> Self {
        Self {
            company_id: b.company_id,
            lead_id: b.lead_id,
            tour_id: Some(b.tour_id),
            vehicle_id: b.vehicle_id,
            driver_id: b.driver_id,
            status: Some(b.status.clone()),
            type_of_tour: b.type_of_tour.clone(),
            booking_date: b.booking_date,
            booking_end_date: b.booking_end_date,
            duration: b.duration,
            actual_duration: b.actual_duration,
            booked_distance_km: b.booked_distance_km,
            total_amount: b.total_amount,
            actual_distance_km: b.actual_distance_km,
            actual_total_amount: b.actual_total_amount,
            amount_paid: b.amount_paid,
            outstanding_amount: Some(b.outstanding_amount),
            expenses: b.expenses,
            toll_tax: b.toll_tax,
            profit: b.profit,
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct World {
    bookings: HashMap<i64, StoredBooking>,
    tours: HashMap<i64, TourSeed>,
    companies: HashMap<i64, CompanyRates>,
    vehicles: HashMap<i64, (Option<i64>, String)>,
    drivers: HashMap<i64, String>,
    next_booking_id: i64,
    fail_vehicle_lookups: bool,
    fail_vehicle_writes: bool,
    fail_driver_writes: bool,
    fail_rate_lookups: bool,
    race_next_write: bool,
    booking_writes: usize,
    fleet_writes: usize,
}

/// Booking, fleet and rate store backed by hash maps
#[derive(Default)]
pub struct MemoryStore {
    world: Mutex<World>,
}

fn unavailable() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

fn set<T: Clone>(slot: &mut Option<T>, field: &Field<T>) {
    if let Some(value) = field.present() {
        *slot = value.cloned();
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_company(&self, id: i64, rates: CompanyRates) {
        self.world.lock().unwrap().companies.insert(id, rates);
    }

    pub fn add_vehicle(&self, id: i64, assigned_driver_id: Option<i64>, status: &str) {
        self.world
            .lock()
            .unwrap()
            .vehicles
            .insert(id, (assigned_driver_id, status.to_string()));
    }

    pub fn add_driver(&self, id: i64, status: &str) {
        self.world.lock().unwrap().drivers.insert(id, status.to_string());
    }

    pub fn add_tour(&self, id: i64, seed: TourSeed) {
        self.world.lock().unwrap().tours.insert(id, seed);
    }

    pub fn add_booking(&self, id: i64, booking: StoredBooking) {
        let mut world = self.world.lock().unwrap();
        world.bookings.insert(id, booking);
        world.next_booking_id = world.next_booking_id.max(id);
    }

    pub fn booking(&self, id: i64) -> Option<StoredBooking> {
        self.world.lock().unwrap().bookings.get(&id).cloned()
    }

    /// Lets another writer commit between the next snapshot read and the
    /// compare-and-swap that follows it
    pub fn bump_version_on_next_write(&self) {
        self.world.lock().unwrap().race_next_write = true;
    }

    pub fn booking_writes(&self) -> usize {
        self.world.lock().unwrap().booking_writes
    }

    pub fn fleet_writes(&self) -> usize {
        self.world.lock().unwrap().fleet_writes
    }

    pub fn vehicle_status(&self, id: i64) -> Option<String> {
        self.world.lock().unwrap().vehicles.get(&id).map(|(_, s)| s.clone())
    }

    pub fn driver_status(&self, id: i64) -> Option<String> {
        self.world.lock().unwrap().drivers.get(&id).cloned()
    }

    pub fn fail_vehicle_lookups(&self) {
        self.world.lock().unwrap().fail_vehicle_lookups = true;
    }

    pub fn fail_vehicle_writes(&self) {
        self.world.lock().unwrap().fail_vehicle_writes = true;
    }

    pub fn fail_driver_writes(&self) {
        self.world.lock().unwrap().fail_driver_writes = true;
    }

    pub fn fail_rate_lookups(&self) {
        self.world.lock().unwrap().fail_rate_lookups = true;
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_snapshot(&self, id: i64) -> AppResult<Option<BookingSnapshot>> {
        let world = self.world.lock().unwrap();
        let Some(b) = world.bookings.get(&id) else {
            return Ok(None);
        };

        let rates = b
            .company_id
            .and_then(|c| world.companies.get(&c).copied())
            .unwrap_or_default();
        let vehicle_driver = b
            .vehicle_id
            .and_then(|v| world.vehicles.get(&v))
            .and_then(|(driver, _)| *driver);

        Ok(Some(BookingSnapshot {
            id,
            total_amount: b.total_amount,
            actual_total_amount: b.actual_total_amount,
            booked_distance_km: b.booked_distance_km,
            actual_distance_km: b.actual_distance_km,
            amount_paid: b.amount_paid,
            outstanding_amount: b.outstanding_amount,
            expenses: b.expenses,
            toll_tax: b.toll_tax,
            profit: b.profit,
            type_of_tour: b.type_of_tour.clone(),
            vehicle_id: b.vehicle_id,
            driver_id: b.driver_id,
            status: b.status.clone(),
            version: b.version,
            localcharge: rates.localcharge,
            outstationcharge: rates.outstationcharge,
            lumpsumcharge: rates.lumpsumcharge,
            vehicle_assigned_driver_id: vehicle_driver,
        }))
    }

    async fn find_tour_seed(&self, tour_id: i64) -> AppResult<Option<TourSeed>> {
        Ok(self.world.lock().unwrap().tours.get(&tour_id).cloned())
    }

    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<i64> {
        let mut world = self.world.lock().unwrap();
        world.next_booking_id += 1;
        let id = world.next_booking_id;
        world.bookings.insert(id, StoredBooking::from(booking));
        world.booking_writes += 1;
        Ok(id)
    }

    async fn assign_name(&self, id: i64, name: &str) -> AppResult<()> {
        let mut world = self.world.lock().unwrap();
        if let Some(booking) = world.bookings.get_mut(&id) {
            booking.name = Some(name.to_string());
        }
        Ok(())
    }

    async fn apply_changes(
        &self,
        id: i64,
        expected_version: i32,
        changes: &BookingChanges,
    ) -> AppResult<bool> {
        let mut world = self.world.lock().unwrap();
        let raced = std::mem::take(&mut world.race_next_write);
        let Some(b) = world.bookings.get_mut(&id) else {
            return Ok(false);
        };
        if raced {
            b.version += 1;
        }
        if b.version != expected_version {
            return Ok(false);
        }

        set(&mut b.vehicle_id, &changes.vehicle_id);
        set(&mut b.driver_id, &changes.driver_id);
        b.actual_distance_km = changes.actual_distance_km.or(b.actual_distance_km);
        b.actual_total_amount = changes.actual_total_amount.or(b.actual_total_amount);
        b.amount_paid = changes.amount_paid.or(b.amount_paid);
        b.outstanding_amount = changes.outstanding_amount.or(b.outstanding_amount);
        b.expenses = changes.expenses.or(b.expenses);
        b.toll_tax = changes.toll_tax.or(b.toll_tax);
        b.profit = changes.profit.or(b.profit);
        set(&mut b.company_id, &changes.company_id);
        set(&mut b.lead_id, &changes.lead_id);
        set(&mut b.tour_id, &changes.tour_id);
        set(&mut b.booking_date, &changes.booking_date);
        set(&mut b.booking_end_date, &changes.booking_end_date);
        set(&mut b.booked_distance_km, &changes.booked_distance_km);
        set(&mut b.total_amount, &changes.total_amount);
        set(&mut b.status, &changes.status);
        b.version += 1;

        world.booking_writes += 1;
        Ok(true)
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn assigned_driver(&self, vehicle_id: i64) -> AppResult<Option<i64>> {
        let world = self.world.lock().unwrap();
        if world.fail_vehicle_lookups {
            return Err(unavailable());
        }
        Ok(world.vehicles.get(&vehicle_id).and_then(|(driver, _)| *driver))
    }

    async fn set_vehicle_availability(
        &self,
        vehicle_id: i64,
        status: &VehicleAvailability,
    ) -> AppResult<bool> {
        let mut world = self.world.lock().unwrap();
        if world.fail_vehicle_writes {
            return Err(unavailable());
        }
        let updated = match world.vehicles.get_mut(&vehicle_id) {
            Some((_, current)) => {
                *current = status.as_str().to_string();
                true
            }
            None => false,
        };
        world.fleet_writes += usize::from(updated);
        Ok(updated)
    }

    async fn set_driver_status(&self, driver_id: i64, status: &DriverStatus) -> AppResult<bool> {
        let mut world = self.world.lock().unwrap();
        if world.fail_driver_writes {
            return Err(unavailable());
        }
        let updated = match world.drivers.get_mut(&driver_id) {
            Some(current) => {
                *current = status.as_str().to_string();
                true
            }
            None => false,
        };
        world.fleet_writes += usize::from(updated);
        Ok(updated)
    }
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn company_rates(&self, company_id: i64) -> AppResult<Option<CompanyRates>> {
        let world = self.world.lock().unwrap();
        if world.fail_rate_lookups {
            return Err(unavailable());
        }
        Ok(world.companies.get(&company_id).copied())
    }
}
