use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, OptimizeSettlementRequest},
    core::models::{
        audit::AppLog,
        member::Member,
        settlement::{OptimizationInfo, SettlementPlan, Transaction},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(super::handlers::optimize_settlement, super::handlers::get_app_logs),
    components(schemas(
        OptimizeSettlementRequest,
        Member,
        ErrorResponse,
        SettlementPlan,
        Transaction,
        OptimizationInfo,
        AppLog
    )),
    info(
        title = "RoomLedger Settlement API",
        description = "Computes a low-transaction plan that settles a group's net balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
