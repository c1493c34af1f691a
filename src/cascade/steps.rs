// src/cascade/steps.rs
//! The tables that reference a duty location, directly or transitively.
//!
//! Listed in deletion order: every table appears before each table it points at.
//! `Cascade::verify` enforces that, so adding a dependent table is one entry here.

use super::{CascadeStep, Link, Parent};

const fn via(column: &'static str, table: &'static str) -> Link {
    Link { column, parent: Parent::Step(table) }
}

const fn location(column: &'static str) -> Link {
    Link { column, parent: Parent::Location }
}

const fn step(table: &'static str, links: &'static [Link]) -> CascadeStep {
    CascadeStep { table, links }
}

pub const STANDARD: &[CascadeStep] = &[
    // service items and everything hanging off them
    step("service_request_document_uploads", &[via("service_request_document_id", "service_request_documents")]),
    step("service_request_documents", &[via("mto_service_item_id", "mto_service_items")]),
    step("payment_service_item_params", &[via("payment_service_item_id", "payment_service_items")]),
    step(
        "payment_service_items",
        &[via("mto_service_item_id", "mto_service_items"), via("payment_request_id", "payment_requests")],
    ),
    step("mto_service_item_dimensions", &[via("mto_service_item_id", "mto_service_items")]),
    step("service_items_customer_contacts", &[via("mto_service_item_id", "mto_service_items")]),
    step("mto_service_items", &[via("mto_shipment_id", "mto_shipments"), via("move_id", "moves")]),
    // shipment children
    step("sit_extensions", &[via("mto_shipment_id", "mto_shipments")]),
    step("mto_agents", &[via("mto_shipment_id", "mto_shipments")]),
    step("reweighs", &[via("shipment_id", "mto_shipments")]),
    step("shipment_address_updates", &[via("shipment_id", "mto_shipments")]),
    step("weight_tickets", &[via("ppm_shipment_id", "ppm_shipments")]),
    step("moving_expenses", &[via("ppm_shipment_id", "ppm_shipments")]),
    step("progear_weight_tickets", &[via("ppm_shipment_id", "ppm_shipments")]),
    step("ppm_shipments", &[via("shipment_id", "mto_shipments")]),
    // payment requests
    step("prime_uploads", &[via("proof_of_service_docs_id", "proof_of_service_docs")]),
    step("proof_of_service_docs", &[via("payment_request_id", "payment_requests")]),
    step("edi_errors", &[via("payment_request_id", "payment_requests")]),
    step("payment_request_to_interchange_control_numbers", &[via("payment_request_id", "payment_requests")]),
    step("payment_requests", &[via("move_id", "moves")]),
    // move-level records
    step("evaluation_reports", &[via("shipment_id", "mto_shipments"), via("move_id", "moves")]),
    step("webhook_notifications", &[via("mto_shipment_id", "mto_shipments"), via("move_id", "moves")]),
    step("mto_shipments", &[via("move_id", "moves")]),
    step("signed_certifications", &[via("move_id", "moves")]),
    step("personally_procured_moves", &[via("move_id", "moves")]),
    step("customer_support_remarks", &[via("move_id", "moves")]),
    step("moves", &[via("orders_id", "orders")]),
    // direct references to the location
    step(
        "orders",
        &[
            location("origin_duty_location_id"),
            location("new_duty_location_id"),
            via("service_member_id", "service_members"),
        ],
    ),
    step("backup_contacts", &[via("service_member_id", "service_members")]),
    step("service_members", &[location("duty_location_id")]),
    step("duty_location_names", &[location("duty_location_id")]),
];
