//! PostgreSQL adapter for CustomerRepository
//!
//! Every read joins `cities` (LEFT JOIN) so customers come back with their
//! city resolved. The text search filters on the joined city name as well.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::entities::{City, CityId, Customer, CustomerId, NewCustomer, NewResident};
use crate::domain::ports::CustomerRepository;
use crate::entity::{cities, customers};
use crate::error::DomainError;

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresCustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Run a filtered customer query with the city joined, ordered by ID
    async fn find_with_city(&self, condition: Condition) -> Result<Vec<Customer>, DomainError> {
        let rows = customers::Entity::find()
            .find_also_related(cities::Entity)
            .filter(condition)
            .order_by_asc(customers::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        rows.into_iter().map(to_customer).collect()
    }

    /// Build a customer from a freshly written row and the already resolved city
    fn written(model: customers::Model, city: Option<City>) -> Customer {
        Customer {
            id: CustomerId(model.id),
            name: model.name,
            address: model.address,
            city,
        }
    }
}

/// Escape LIKE metacharacters so `text` matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(column) LIKE LOWER('%text%')`, so both sides are folded by the
/// database. Backslash is PostgreSQL's default LIKE escape character.
fn lower_contains(column: SimpleExpr, text: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(text));
    Expr::expr(Func::lower(column)).binary(BinOper::Like, Func::lower(Expr::val(pattern)))
}

fn customer_name_contains(text: &str) -> SimpleExpr {
    lower_contains(Expr::col((customers::Entity, customers::Column::Name)).into(), text)
}

fn city_name_contains(text: &str) -> SimpleExpr {
    lower_contains(Expr::col((cities::Entity, cities::Column::Name)).into(), text)
}

fn to_customer(
    (model, city): (customers::Model, Option<cities::Model>),
) -> Result<Customer, DomainError> {
    let city = city.map(City::try_from).transpose()?;
    Ok(Customer {
        id: CustomerId(model.id),
        name: model.name,
        address: model.address,
        city,
    })
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let result = customers::Entity::find_by_id(id.0)
            .find_also_related(cities::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(to_customer).transpose()
    }

    async fn exists(&self, id: CustomerId) -> Result<bool, DomainError> {
        let count = customers::Entity::find_by_id(id.0)
            .count(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        customers::Entity::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Customer>, DomainError> {
        self.find_with_city(Condition::all()).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, DomainError> {
        self.find_with_city(Condition::all().add(customers::Column::Name.eq(name)))
            .await
    }

    async fn find_by_city(&self, city_id: CityId) -> Result<Vec<Customer>, DomainError> {
        self.find_with_city(Condition::all().add(customers::Column::CityId.eq(city_id.0)))
            .await
    }

    async fn search_by_id_or_name(
        &self,
        id: Option<CustomerId>,
        name: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError> {
        if id.is_none() && name.is_none() {
            return Ok(Vec::new());
        }

        let condition = Condition::any()
            .add_option(id.map(|id| customers::Column::Id.eq(id.0)))
            .add_option(name.map(customer_name_contains));

        self.find_with_city(condition).await
    }

    async fn search_with_city(
        &self,
        text: &str,
        id: Option<CustomerId>,
    ) -> Result<Vec<Customer>, DomainError> {
        let condition = Condition::any()
            .add_option(id.map(|id| customers::Column::Id.eq(id.0)))
            .add(customer_name_contains(text))
            .add(city_name_contains(text));

        self.find_with_city(condition).await
    }

    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            name: Set(customer.name.clone()),
            address: Set(customer.address.clone()),
            city_id: Set(customer.city_id().map(|id| id.0)),
            ..Default::default()
        };

        let result = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Self::written(result, customer.city.clone()))
    }

    async fn create_with_cities(
        &self,
        residents: &[NewResident],
    ) -> Result<Vec<Customer>, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut created = Vec::with_capacity(residents.len());
        for resident in residents {
            let city = cities::ActiveModel {
                name: Set(resident.city.name.clone()),
                state: Set(resident.city.state.code().to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
            let city = City::try_from(city)?;

            let customer = customers::ActiveModel {
                name: Set(resident.name.clone()),
                address: Set(resident.address.clone()),
                city_id: Set(Some(city.id.0)),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

            created.push(Self::written(customer, Some(city)));
        }

        // Dropping `txn` on any early return above rolls everything back
        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn replace(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Customer, DomainError> {
        let model = customers::ActiveModel {
            id: Set(id.0),
            name: Set(customer.name.clone()),
            address: Set(customer.address.clone()),
            city_id: Set(customer.city_id().map(|id| id.0)),
        };

        let result = model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found("Customer", "id", id),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(Self::written(result, customer.city.clone()))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, DomainError> {
        let result = customers::Entity::delete_by_id(id.0)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
