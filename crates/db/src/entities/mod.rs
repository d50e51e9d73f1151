//! `SeaORM` entity definitions for the financial control tables.

pub mod accounts;
pub mod approval_events;
pub mod approval_requests;
pub mod approval_thresholds;
pub mod bank_deposits;
pub mod cash_transactions;
pub mod goods_receipts;
pub mod journal_entries;
pub mod journal_line_items;
pub mod provider_ledger_entries;
pub mod purchase_orders;
pub mod referral_invoice_items;
pub mod referral_invoices;
pub mod referral_providers;
pub mod sea_orm_active_enums;
pub mod settlements;
pub mod tenants;
pub mod three_way_matches;
pub mod vendor_invoices;
