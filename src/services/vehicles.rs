//! Fleet catalog and maintenance log service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        maintenance::{CreateMaintenance, Maintenance},
        vehicle::{CreateVehicle, UpdateVehicle, Vehicle},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct VehiclesService {
    repository: Repository,
}

impl VehiclesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, term: Option<&str>) -> AppResult<Vec<Vehicle>> {
        self.repository.vehicles_list(term).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Vehicle> {
        self.repository.vehicles_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateVehicle) -> AppResult<Vehicle> {
        data.validate()?;
        data.check_amounts().map_err(AppError::Validation)?;
        let vehicle = self.repository.vehicles_create(data).await?;
        tracing::info!("Vehicle {} ({}) added to the fleet", vehicle.id, vehicle.registration_number);
        Ok(vehicle)
    }

    pub async fn update(&self, id: i32, data: &UpdateVehicle) -> AppResult<Vehicle> {
        data.validate()?;
        data.check_amounts().map_err(AppError::Validation)?;
        self.repository.vehicles_update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.vehicles_delete(id).await?;
        tracing::info!("Vehicle {} removed from the fleet", id);
        Ok(())
    }

    pub async fn list_maintenance(&self, vehicle_id: i32) -> AppResult<Vec<Maintenance>> {
        self.repository.vehicles_get_by_id(vehicle_id).await?;
        self.repository.maintenance_list_for_vehicle(vehicle_id).await
    }

    pub async fn add_maintenance(&self, vehicle_id: i32, data: &CreateMaintenance) -> AppResult<Maintenance> {
        data.validate()?;
        if data.cost < rust_decimal::Decimal::ZERO {
            return Err(AppError::Validation("cost cannot be negative".to_string()));
        }
        self.repository.vehicles_get_by_id(vehicle_id).await?;
        self.repository.maintenance_create(vehicle_id, data).await
    }
}
