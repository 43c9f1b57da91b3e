//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{BodyInfo, BodyKind, PointingForm};
use super::handlers::{meteo, pointing, system};
use crate::astro::Body;
use crate::domain::{AppStatus, CoordSample, Meteorological, StatusSnapshot};
use crate::error::{ErrorBody, ErrorResponse};
use crate::meteo::{MeteoReading, MeteoSource};

/// Generated OpenAPI specification, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "pointing-gateway",
        description = "Telescope pointing service. Live status and coordinates are pushed on `/ws`."
    ),
    paths(
        system::health_handler,
        system::status_handler,
        pointing::point_to,
        pointing::stop_pointing,
        pointing::establish,
        pointing::list_bodies,
        meteo::current_meteo,
    ),
    components(schemas(
        AppStatus,
        Body,
        BodyInfo,
        BodyKind,
        CoordSample,
        ErrorBody,
        ErrorResponse,
        Meteorological,
        MeteoReading,
        MeteoSource,
        PointingForm,
        StatusSnapshot,
        system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Pointing", description = "Pointing and tracking control"),
        (name = "Meteo", description = "Site weather"),
    )
)]
pub struct ApiDoc;
