//! Customer profile service

use validator::Validate;

use crate::{
    error::AppResult,
    models::customer::{Customer, UpdateCustomer},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_for_user(&self, user_id: i32) -> AppResult<Customer> {
        self.repository.customers_get_by_user(user_id).await
    }

    pub async fn update_for_user(&self, user_id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        data.validate()?;
        self.repository.customers_update(user_id, data).await
    }
}
