//! Business logic services

pub mod bookings;
pub mod customers;
pub mod distance;
pub mod drivers;
pub mod fare;
pub mod settlement;
pub mod stats;
pub mod users;
pub mod vehicles;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub customers: customers::CustomersService,
    pub vehicles: vehicles::VehiclesService,
    pub bookings: bookings::BookingsService,
    pub drivers: drivers::DriversService,
    pub distance: distance::DistanceService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let matrix = distance::GoogleDistanceMatrix::new(&config.distance)?;
        if config.distance.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
            tracing::warn!("No distance API key configured; distance estimates are disabled");
        }

        Ok(Self {
            users: users::UsersService::new(repository.clone(), config.auth.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            vehicles: vehicles::VehiclesService::new(repository.clone()),
            bookings: bookings::BookingsService::new(
                repository.clone(),
                fare::FareRules::from(&config.pricing),
            ),
            drivers: drivers::DriversService::new(repository.clone()),
            distance: distance::DistanceService::new(Arc::new(matrix), &config.distance),
            stats: stats::StatsService::new(repository),
        })
    }
}
