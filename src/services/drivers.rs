//! Driver roster service

use validator::Validate;

use crate::{
    error::AppResult,
    models::driver::{CreateDriver, Driver, DriverList, UpdateDriver},
    repository::Repository,
};

#[derive(Clone)]
pub struct DriversService {
    repository: Repository,
}

impl DriversService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<DriverList> {
        let drivers = self.repository.drivers_list().await?;
        Ok(DriverList {
            total_drivers: drivers.len() as i64,
            drivers,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Driver> {
        self.repository.drivers_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateDriver) -> AppResult<Driver> {
        data.validate()?;
        self.repository.drivers_create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateDriver) -> AppResult<Driver> {
        data.validate()?;
        self.repository.drivers_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.drivers_delete(id).await
    }
}
