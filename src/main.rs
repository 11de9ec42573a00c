mod domain;
mod clients;
mod dashboard;
mod validation;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod company_actor;
mod user_actor;
mod product_actor;
mod order_actor;

use anyhow::Context;
use rust_decimal_macros::dec;
use tracing::{error, info, Instrument};
use crate::app_system::{setup_tracing, InventorySystem, SystemConfig};
use crate::domain::{
    CompanyPatch, CompanySignup, DraftLine, OrderDraft, ProductCreate, ProductPatch, UserCreate, UserPatch,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SystemConfig::from_env().context("invalid configuration")?;
    setup_tracing(&config.log_filter);

    info!("Starting stockroom");
    let system = InventorySystem::new(&config);

    let span = tracing::info_span!("signup");
    let receipt = async {
        info!("Registering demo company");
        system
            .company_client
            .sign_up(CompanySignup {
                company_name: "Northwind Traders".to_string(),
                industry: Some("Wholesale".to_string()),
                admin_name: "Alice".to_string(),
                admin_email: "alice@northwind.example".to_string(),
            })
            .await
    }
    .instrument(span)
    .await?;

    let company_id = receipt.company_id;
    let clerk_id = system
        .user_client
        .create_user(UserCreate::staff(company_id.clone(), "Bob", "bob@northwind.example"))
        .await?;
    system
        .user_client
        .update_user(clerk_id.clone(), UserPatch { name: Some("Bob Martin".to_string()), ..Default::default() })
        .await?;
    system
        .company_client
        .update_company(
            company_id.clone(),
            CompanyPatch { name: None, industry: Some("Food wholesale".to_string()) },
        )
        .await?;

    let span = tracing::info_span!("catalog");
    let (chai, syrup) = async {
        let chai = system
            .product_client
            .create_product(ProductCreate {
                company_id: company_id.clone(),
                sku: "CHAI-12".to_string(),
                name: "Chai, 12 boxes".to_string(),
                unit_price: dec!(18.00),
                quantity: 40,
                reorder_level: 10,
            })
            .await?;
        let syrup = system
            .product_client
            .create_product(ProductCreate {
                company_id: company_id.clone(),
                sku: "SYRUP-550".to_string(),
                name: "Aniseed syrup".to_string(),
                unit_price: dec!(10.00),
                quantity: 12,
                reorder_level: 5,
            })
            .await?;
        system
            .product_client
            .update_product(syrup.clone(), ProductPatch { unit_price: Some(dec!(10.50)), ..Default::default() })
            .await?;
        anyhow::Ok((chai, syrup))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_processing");
    let order_result = async {
        info!("Processing order through inventory system");
        system
            .order_client
            .create_order(OrderDraft {
                company_id: company_id.clone(),
                created_by: clerk_id.clone(),
                customer_name: "Alfreds Futterkiste".to_string(),
                lines: vec![
                    DraftLine::new(chai.clone(), 5).with_discount(dec!(9.00)),
                    DraftLine::new(syrup.clone(), 8).with_price(dec!(9.50)),
                ],
            })
            .await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order_id) => {
            info!(%order_id, "Order processed successfully");
            system.order_client.start_processing(order_id.clone()).await?;
            system
                .order_client
                .ship_order(order_id.clone(), "Speedy Express".to_string(), "SE-000184".to_string())
                .await?;
            system.order_client.deliver_order(order_id).await?;
        }
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    let withdrawn = system
        .order_client
        .create_order(OrderDraft {
            company_id: company_id.clone(),
            created_by: clerk_id.clone(),
            customer_name: "Around the Horn".to_string(),
            lines: vec![DraftLine::new(chai.clone(), 2)],
        })
        .await?;
    system
        .order_client
        .cancel_order(withdrawn, Some("customer withdrew".to_string()))
        .await?;
    let level = system.product_client.check_stock(chai).await?;
    info!(sku = "CHAI-12", level, "Stock after cancellation");

    system
        .product_client
        .adjust_stock(syrup, -1, Some("damaged in storage".to_string()))
        .await?;

    for product in system.product_client.low_stock(company_id.clone()).await? {
        info!(sku = %product.sku, quantity = product.quantity, "Reordering");
        system.product_client.receive_stock(product.id, (product.reorder_level * 4).max(1)).await?;
    }

    let companies = system.company_client.list_all_companies().await?;
    info!(companies = companies.len(), "Tenants registered");

    let summary = system.dashboard(company_id).await?;
    info!(dashboard = %serde_json::to_string(&summary)?, "Dashboard ready");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
