use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::tour_dto::{CreateTourRequest, UpdateTourRequest};
use crate::models::tour::{TourDetail, TourSummary};
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::fleet_repository::{FleetRepository, FleetStore};
use crate::repositories::tour_repository::{NewTour, TourChanges, TourRepository};
use crate::services::pricing_service::{price_new_tour, reprice_tour};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::field::Field;
use crate::utils::money::Money;

#[derive(Debug, Serialize)]
pub struct TourCreated {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub total_amount: Option<Money>,
}

pub struct TourController {
    repository: TourRepository,
    companies: CompanyRepository,
    fleet: FleetRepository,
}

impl TourController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TourRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    async fn driver_of(&self, vehicle_id: Option<i64>) -> Result<Option<i64>, AppError> {
        match vehicle_id {
            Some(vehicle_id) => self.fleet.assigned_driver(vehicle_id).await.map_err(|e| {
                AppError::VehicleLookupFailed(format!(
                    "Error fetching assigned driver for vehicle {}: {}",
                    vehicle_id, e
                ))
            }),
            None => Ok(None),
        }
    }

    pub async fn list(&self) -> Result<Vec<TourSummary>, AppError> {
        self.repository.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<TourDetail, AppError> {
        self.repository
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Tour", id))
    }

    pub async fn create(&self, request: CreateTourRequest) -> Result<ApiResponse<TourCreated>, AppError> {
        request.validate()?;
        let inputs = request.pricing()?;

        let pricing = price_new_tour(&self.companies, &inputs).await?;
        let vehicle_id = request.vehicle_id.value().copied();
        let driver_id = self.driver_of(vehicle_id).await?;

        let (id, name) = self
            .repository
            .create(NewTour {
                company_id: request.company_id,
                lead_id: request.lead_id,
                vehicle_id,
                driver_id,
                type_of_tour: request.type_of_tour,
                description: request.description,
                start_state: request.start_state,
                end_state: request.end_state,
                start_city: request.start_city,
                end_city: request.end_city,
                pickup_location: request.pickup_location,
                drop_location: request.drop_location,
                start_date: request.start_date,
                end_date: request.end_date,
                duration_days: request.duration_days,
                distance_km: inputs.distance_km.value().copied(),
                premium: inputs.premium.value().copied(),
                price: pricing.price,
                total_amount: pricing.total_amount,
            })
            .await?;

        info!(tour_id = id, price = %pricing.price, "Tour created");

        Ok(ApiResponse::success_with_message(
            TourCreated {
                id,
                name,
                price: pricing.price,
                total_amount: pricing.total_amount,
            },
            "Tour created successfully",
        ))
    }

    pub async fn update(&self, id: i64, request: UpdateTourRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        let pricing = request.pricing()?;
        let repricing = if pricing.changes_total() {
            let stored = self
                .repository
                .find_pricing_inputs(id)
                .await?
                .ok_or_else(|| not_found_error("Tour", id))?;
            reprice_tour(&self.companies, &stored, &pricing).await?
        } else {
            None
        };

        let driver_id = match &request.vehicle_id {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(vehicle_id) => Field::from(self.driver_of(Some(*vehicle_id)).await?),
        };

        let changes = TourChanges {
            company_id: request.company_id,
            lead_id: request.lead_id,
            vehicle_id: request.vehicle_id,
            driver_id,
            type_of_tour: request.type_of_tour,
            description: request.description,
            start_state: request.start_state,
            end_state: request.end_state,
            start_city: request.start_city,
            end_city: request.end_city,
            pickup_location: request.pickup_location,
            drop_location: request.drop_location,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_days: request.duration_days,
            distance_km: pricing.distance_km,
            premium: pricing.premium,
            price: repricing.and_then(|r| r.price),
            total_amount: match repricing {
                Some(r) => Field::from(r.total_amount),
                None => Field::Absent,
            },
        };

        if !self.repository.update(id, changes).await? {
            return Err(not_found_error("Tour", id));
        }

        Ok(ApiResponse::message("Tour updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Tour", id));
        }
        Ok(())
    }
}
