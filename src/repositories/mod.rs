//! Repositories
//!
//! PostgreSQL access per table. The booking core talks to the store through
//! the `BookingStore`, `FleetStore` and `RateStore` traits so it can run
//! against other implementations in tests.

pub mod booking_repository;
pub mod company_repository;
pub mod driver_repository;
pub mod fleet_repository;
pub mod lead_repository;
pub mod tour_repository;
pub mod user_repository;
pub mod vehicle_repository;

use sqlx::{Encode, Postgres, QueryBuilder, Type};

use crate::utils::field::Field;

/// Builds `UPDATE <table> SET a = $1, b = $2 ...` from the fields present
/// in a partial update
pub struct UpdateBuilder<'args> {
    builder: QueryBuilder<'args, Postgres>,
    assignments: usize,
}

impl<'args> UpdateBuilder<'args> {
    pub fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            assignments: 0,
        }
    }

    fn separator(&mut self) {
        if self.assignments > 0 {
            self.builder.push(", ");
        }
        self.assignments += 1;
    }

    pub fn set<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Send + Type<Postgres>,
    {
        self.separator();
        self.builder.push(column).push(" = ").push_bind(value);
        self
    }

    /// Sets the column to the value, to NULL, or skips it when absent
    pub fn set_field<T>(&mut self, column: &str, field: Field<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Send + Type<Postgres>,
    {
        match field {
            Field::Absent => self,
            Field::Null => self.set(column, Option::<T>::None),
            Field::Value(value) => self.set(column, Some(value)),
        }
    }

    pub fn set_opt<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Send + Type<Postgres>,
    {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Appends a literal assignment such as `version = version + 1`
    pub fn set_raw(&mut self, assignment: &str) -> &mut Self {
        self.separator();
        self.builder.push(assignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    /// Adds `WHERE id = $n` and hands back the query
    pub fn where_id(mut self, id: i64) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ").push_bind(id);
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_builder_sql() {
        let mut update = UpdateBuilder::new("drivers");
        update
            .set_field("name", Field::Value("Ravi".to_string()))
            .set_field::<String>("email", Field::Null)
            .set_field::<String>("phone", Field::Absent)
            .set_raw("updated_at = NOW()");
        assert!(!update.is_empty());

        let query = update.where_id(4);
        assert_eq!(
            query.sql(),
            "UPDATE drivers SET name = $1, email = $2, updated_at = NOW() WHERE id = $3"
        );
    }

    #[test]
    fn test_update_builder_empty() {
        let mut update = UpdateBuilder::new("leads");
        update.set_opt::<String>("name", None);
        assert!(update.is_empty());
    }
}
