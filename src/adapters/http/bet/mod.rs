//! HTTP adapter for bet commands issued by the operator front end.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CancelAllRequest, CancelAllResponse, ErrorResponse, StatusResponse, SubmitBetRequest,
    SubmitBetResponse,
};
pub use handlers::{BetApiError, BetAppState};
pub use routes::{bet_router, bet_routes};
