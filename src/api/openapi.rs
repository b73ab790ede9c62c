//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, auth, bookings, customers, distance, drivers, health, staff, vehicles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Easy Rentals API",
        version = "1.0.0",
        description = "Car rental booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        auth::update_profile,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        vehicles::list_maintenance,
        vehicles::create_maintenance,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::list_returned_bookings,
        bookings::fare_quote,
        // Staff
        staff::list_active_bookings,
        staff::list_returns,
        staff::mark_returned,
        staff::quick_return,
        // Distance
        distance::estimate,
        // Customers
        customers::get_my_profile,
        customers::update_my_profile,
        // Drivers
        drivers::list_drivers,
        drivers::get_driver,
        drivers::create_driver,
        drivers::update_driver,
        drivers::delete_driver,
        // Admin
        admin::dashboard,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::RegisterRequest,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserInfo,
            crate::models::user::UpdateProfile,
            // Vehicles
            crate::models::vehicle::Vehicle,
            crate::models::vehicle::AcType,
            crate::models::vehicle::FuelType,
            crate::models::vehicle::VehicleStatus,
            crate::models::vehicle::CreateVehicle,
            crate::models::vehicle::UpdateVehicle,
            crate::models::maintenance::Maintenance,
            crate::models::maintenance::CreateMaintenance,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingList,
            crate::models::booking::CreateBooking,
            crate::models::booking::FareQuoteRequest,
            crate::models::booking::MarkReturned,
            crate::models::booking::ReturnOutcome,
            crate::models::booking::DriveMode,
            crate::models::booking::NumericInput,
            crate::services::fare::Fare,
            // Distance
            crate::services::distance::DistanceRequest,
            crate::services::distance::DistanceEstimate,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::UpdateCustomer,
            // Drivers
            crate::models::driver::Driver,
            crate::models::driver::DriverStatus,
            crate::models::driver::DriverList,
            crate::models::driver::CreateDriver,
            crate::models::driver::UpdateDriver,
            // Admin
            crate::services::stats::Dashboard,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and authentication"),
        (name = "vehicles", description = "Fleet catalog and maintenance"),
        (name = "bookings", description = "Customer bookings and fare quotes"),
        (name = "staff", description = "Active bookings and vehicle returns"),
        (name = "distance", description = "Trip distance and fare estimates"),
        (name = "customers", description = "Customer profile"),
        (name = "drivers", description = "Driver roster"),
        (name = "admin", description = "Admin dashboard")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
