use crate::api::service;
use actix_web::{post, web, Responder};
use crossbalance::types::BalanceRequest;

#[post("/crossChainBalances")]
async fn cross_chain_balances(body: web::Json<BalanceRequest>) -> impl Responder {
    log::info!("cross_chain_balances - {:?}", body);
    web::Json(service::cross_chain_balances(&body).await)
}

#[post("/retryCrossChainBalances")]
async fn retry_cross_chain_balances(body: web::Json<BalanceRequest>) -> impl Responder {
    log::info!("retry_cross_chain_balances - {:?}", body);
    web::Json(service::retry_cross_chain_balances(&body).await)
}
