use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::company::{Company, CompanyPick, CompanyRates};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::AppError;
use crate::utils::field::Field;
use crate::utils::money::Money;

/// Source of company per-km charges
#[async_trait]
pub trait RateStore: Send + Sync {
    async fn company_rates(&self, company_id: i64) -> Result<Option<CompanyRates>, AppError>;
}

/// Column values of a company insert
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub localcharge: Option<Money>,
    pub outstationcharge: Option<Money>,
    pub lumpsumcharge: Option<Money>,
    pub localdist: Option<Money>,
    pub outstationdistance: Option<Money>,
}

/// Present fields of a company update
#[derive(Debug, Clone, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub address: Field<String>,
    pub phone: Field<String>,
    pub email: Field<String>,
    pub localcharge: Field<Money>,
    pub outstationcharge: Field<Money>,
    pub lumpsumcharge: Field<Money>,
    pub localdist: Field<Money>,
    pub outstationdistance: Field<Money>,
}

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: NewCompany) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO companies (
                name, address, phone, email, localcharge, outstationcharge,
                lumpsumcharge, localdist, outstationdistance
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(company.name)
        .bind(company.address)
        .bind(company.phone)
        .bind(company.email)
        .bind(company.localcharge)
        .bind(company.outstationcharge)
        .bind(company.lumpsumcharge)
        .bind(company.localdist)
        .bind(company.outstationdistance)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn picklist(&self) -> Result<Vec<CompanyPick>, AppError> {
        let result = sqlx::query_as::<_, CompanyPick>("SELECT id, name FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Returns `false` when no company has this id
    pub async fn update(&self, id: i64, changes: CompanyChanges) -> Result<bool, AppError> {
        let mut update = UpdateBuilder::new("companies");
        update
            .set_opt("name", changes.name)
            .set_field("address", changes.address)
            .set_field("phone", changes.phone)
            .set_field("email", changes.email)
            .set_field("localcharge", changes.localcharge)
            .set_field("outstationcharge", changes.outstationcharge)
            .set_field("lumpsumcharge", changes.lumpsumcharge)
            .set_field("localdist", changes.localdist)
            .set_field("outstationdistance", changes.outstationdistance);

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        let result = update.where_id(id).build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RateStore for CompanyRepository {
    async fn company_rates(&self, company_id: i64) -> Result<Option<CompanyRates>, AppError> {
        let result = sqlx::query_as::<_, CompanyRates>(
            "SELECT localcharge, outstationcharge, lumpsumcharge FROM companies WHERE id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }
}
