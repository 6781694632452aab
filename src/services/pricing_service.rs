//! Tour pricing
//!
//! Resolves the per-km rate of a (company, tour type) pair and computes the
//! baseline total of a tour: `distance_km * 2 * rate + premium`. The factor 2
//! accounts for the return leg.

use crate::models::company::CompanyRates;
use crate::models::tour::{TourPricingInputs, TourType};
use crate::repositories::company_repository::RateStore;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::field::Field;
use crate::utils::money::Money;

/// Picks the company charge matching the tour type
pub fn rate_for(rates: &CompanyRates, tour_type: &TourType) -> Option<Money> {
    match tour_type {
        TourType::Local => rates.localcharge,
        TourType::Outstation => rates.outstationcharge,
        TourType::Lumpsum => rates.lumpsumcharge,
        TourType::Other(_) => None,
    }
}

/// `distance_km * 2 * rate + premium`, or `InvalidAmount` when out of range
pub fn compute_total(distance_km: Money, rate: Money, premium: Money) -> AppResult<Money> {
    distance_km.times(2)?.scaled_by(rate)?.plus(premium)
}

/// Looks up the company's charge for a tour type
///
/// `None` when the type is unrecognized, the company does not exist, or the
/// charge column is empty. A store failure is a `DependencyLookup` error.
pub async fn resolve_rate(
    store: &dyn RateStore,
    company_id: i64,
    tour_type: &TourType,
) -> AppResult<Option<Money>> {
    if let TourType::Other(_) = tour_type {
        return Ok(None);
    }

    let rates = store.company_rates(company_id).await.map_err(|e| {
        tracing::error!(company_id, error = %e, "Error fetching company price");
        AppError::DependencyLookup(format!("Error fetching company price: {}", e))
    })?;

    Ok(rates.and_then(|rates| rate_for(&rates, tour_type)))
}

/// Derived price columns of a tour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourPricing {
    pub price: Money,
    pub total_amount: Option<Money>,
}

/// Pricing inputs carried by a tour create or update request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourPricingPatch {
    pub company_id: Field<i64>,
    pub type_of_tour: Field<String>,
    pub distance_km: Field<Money>,
    pub premium: Field<Money>,
}

impl TourPricingPatch {
    /// Price depends on the company and the tour type
    pub fn changes_price(&self) -> bool {
        self.company_id.is_present() || self.type_of_tour.is_present()
    }

    pub fn changes_total(&self) -> bool {
        self.changes_price() || self.distance_km.is_present() || self.premium.is_present()
    }
}

async fn price_for(
    store: &dyn RateStore,
    company_id: Option<i64>,
    tour_type: Option<&str>,
) -> AppResult<Money> {
    match (company_id, tour_type) {
        (Some(company_id), Some(tour_type)) => {
            let rate = resolve_rate(store, company_id, &TourType::parse(tour_type)).await?;
            Ok(Money::or_zero(rate))
        }
        _ => Ok(Money::ZERO),
    }
}

fn total_for(
    distance_km: Option<Money>,
    price: Money,
    premium: Option<Money>,
) -> AppResult<Option<Money>> {
    match (distance_km, premium) {
        (Some(distance_km), Some(premium)) => compute_total(distance_km, price, premium).map(Some),
        _ => Ok(None),
    }
}

/// Prices a tour at creation
///
/// An unresolvable rate prices at 0. The total is only set when both the
/// distance and the premium are given.
pub async fn price_new_tour(store: &dyn RateStore, patch: &TourPricingPatch) -> AppResult<TourPricing> {
    let price = price_for(
        store,
        patch.company_id.value().copied(),
        patch.type_of_tour.value().map(String::as_str),
    )
    .await?;

    Ok(TourPricing {
        price,
        total_amount: total_for(
            patch.distance_km.value().copied(),
            price,
            patch.premium.value().copied(),
        )?,
    })
}

/// Columns to rewrite when a tour update touches its pricing inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourRepricing {
    /// Set when the company or the tour type changed
    pub price: Option<Money>,
    /// `None` clears the total because an input is missing
    pub total_amount: Option<Money>,
}

/// Reprices a tour from the update merged over its stored inputs
///
/// Returns `None` when the update touches no pricing input.
pub async fn reprice_tour(
    store: &dyn RateStore,
    stored: &TourPricingInputs,
    patch: &TourPricingPatch,
) -> AppResult<Option<TourRepricing>> {
    if !patch.changes_total() {
        return Ok(None);
    }

    let merged_company = merge(&patch.company_id, stored.company_id);
    let merged_type = match patch.type_of_tour.present() {
        Some(value) => value.cloned(),
        None => stored.type_of_tour.clone(),
    };

    let price = if patch.changes_price() {
        Some(price_for(store, merged_company, merged_type.as_deref()).await?)
    } else {
        None
    };
    let price_to_use = price.or(stored.price).unwrap_or(Money::ZERO);

    let total_amount = total_for(
        merge(&patch.distance_km, stored.distance_km),
        price_to_use,
        merge(&patch.premium, stored.premium),
    )?;

    Ok(Some(TourRepricing {
        price,
        total_amount,
    }))
}

fn merge<T: Copy>(field: &Field<T>, stored: Option<T>) -> Option<T> {
    match field.present() {
        Some(value) => value.copied(),
        None => stored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MemoryStore;

    fn rates() -> CompanyRates {
        CompanyRates {
            localcharge: Some(Money::from(40)),
            outstationcharge: Some(Money::from(55)),
            lumpsumcharge: None,
        }
    }

    #[test]
    fn test_rate_for_each_tour_type() {
        assert_eq!(rate_for(&rates(), &TourType::Local), Some(Money::from(40)));
        assert_eq!(rate_for(&rates(), &TourType::Outstation), Some(Money::from(55)));
        assert_eq!(rate_for(&rates(), &TourType::Lumpsum), None);
        assert_eq!(rate_for(&rates(), &TourType::Other("Pilgrimage".into())), None);
    }

    #[test]
    fn test_compute_total_counts_return_leg() {
        assert_eq!(
            compute_total(Money::from(50), Money::from(40), Money::from(200)).unwrap(),
            Money::from(4200)
        );
    }

    #[tokio::test]
    async fn test_huge_distance_is_rejected_not_panicking() {
        let store = MemoryStore::new();
        store.add_company(1, rates());

        let result = price_new_tour(
            &store,
            &TourPricingPatch {
                company_id: Field::Value(1),
                type_of_tour: Field::Value("Local".to_string()),
                distance_km: Field::Value(Money::new(rust_decimal::Decimal::MAX)),
                premium: Field::Value(Money::from(200)),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_new_tour_total() {
        let store = MemoryStore::new();
        store.add_company(1, rates());

        let pricing = price_new_tour(
            &store,
            &TourPricingPatch {
                company_id: Field::Value(1),
                type_of_tour: Field::Value("Local".to_string()),
                distance_km: Field::Value(Money::from(50)),
                premium: Field::Value(Money::from(200)),
            },
        )
        .await
        .unwrap();

        assert_eq!(pricing.price, Money::from(40));
        assert_eq!(pricing.total_amount, Some(Money::from(4200)));
    }

    #[tokio::test]
    async fn test_unresolvable_rate_prices_at_zero() {
        let store = MemoryStore::new();

        let pricing = price_new_tour(
            &store,
            &TourPricingPatch {
                company_id: Field::Value(99),
                type_of_tour: Field::Value("Local".to_string()),
                distance_km: Field::Value(Money::from(50)),
                premium: Field::Value(Money::from(200)),
            },
        )
        .await
        .unwrap();

        assert_eq!(pricing.price, Money::ZERO);
        assert_eq!(pricing.total_amount, Some(Money::from(200)));
    }

    #[tokio::test]
    async fn test_total_needs_distance_and_premium() {
        let store = MemoryStore::new();
        store.add_company(1, rates());

        let pricing = price_new_tour(
            &store,
            &TourPricingPatch {
                company_id: Field::Value(1),
                type_of_tour: Field::Value("Outstation".to_string()),
                distance_km: Field::Value(Money::from(50)),
                premium: Field::Absent,
            },
        )
        .await
        .unwrap();

        assert_eq!(pricing.price, Money::from(55));
        assert_eq!(pricing.total_amount, None);
    }

    #[tokio::test]
    async fn test_reprice_on_type_change_uses_stored_inputs() {
        let store = MemoryStore::new();
        store.add_company(1, rates());
        let stored = TourPricingInputs {
            company_id: Some(1),
            type_of_tour: Some("Local".to_string()),
            distance_km: Some(Money::from(50)),
            premium: Some(Money::from(200)),
            price: Some(Money::from(40)),
        };

        let repricing = reprice_tour(
            &store,
            &stored,
            &TourPricingPatch {
                type_of_tour: Field::Value("Outstation".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(repricing.price, Some(Money::from(55)));
        assert_eq!(repricing.total_amount, Some(Money::from(5700)));
    }

    #[tokio::test]
    async fn test_reprice_on_distance_keeps_stored_price() {
        let store = MemoryStore::new();
        let stored = TourPricingInputs {
            company_id: Some(1),
            type_of_tour: Some("Local".to_string()),
            distance_km: Some(Money::from(50)),
            premium: Some(Money::from(200)),
            price: Some(Money::from(40)),
        };

        let repricing = reprice_tour(
            &store,
            &stored,
            &TourPricingPatch {
                distance_km: Field::Value(Money::from(60)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(repricing.price, None);
        assert_eq!(repricing.total_amount, Some(Money::from(5000)));
    }

    #[tokio::test]
    async fn test_reprice_skipped_without_pricing_inputs() {
        let store = MemoryStore::new();
        let result = reprice_tour(&store, &TourPricingInputs::default(), &TourPricingPatch::default())
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_rate_lookup_failure_is_dependency_error() {
        let store = MemoryStore::new();
        store.add_company(1, rates());
        store.fail_rate_lookups();

        let err = resolve_rate(&store, 1, &TourType::Local).await.unwrap_err();
        assert!(matches!(err, AppError::DependencyLookup(_)));
    }
}
