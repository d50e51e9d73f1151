//! Initial database migration.
//!
//! Creates the enums, tables, indexes, and RLS policies for the
//! financial control schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TENANTS & CHART OF ACCOUNTS
        // ============================================================
        db.execute_unprepared(TENANTS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;

        // ============================================================
        // PART 3: JOURNAL
        // ============================================================
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_LINE_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: APPROVAL WORKFLOW
        // ============================================================
        db.execute_unprepared(APPROVAL_THRESHOLDS_SQL).await?;
        db.execute_unprepared(APPROVAL_REQUESTS_SQL).await?;
        db.execute_unprepared(APPROVAL_EVENTS_SQL).await?;

        // ============================================================
        // PART 5: PROCUREMENT & THREE-WAY MATCHING
        // ============================================================
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(GOODS_RECEIPTS_SQL).await?;
        db.execute_unprepared(VENDOR_INVOICES_SQL).await?;
        db.execute_unprepared(THREE_WAY_MATCHES_SQL).await?;

        // ============================================================
        // PART 6: REFERRAL COMMISSIONS
        // ============================================================
        db.execute_unprepared(REFERRAL_PROVIDERS_SQL).await?;
        db.execute_unprepared(REFERRAL_INVOICES_SQL).await?;
        db.execute_unprepared(REFERRAL_INVOICE_ITEMS_SQL).await?;
        db.execute_unprepared(SETTLEMENTS_SQL).await?;
        db.execute_unprepared(PROVIDER_LEDGER_SQL).await?;

        // ============================================================
        // PART 7: CASH RECONCILIATION
        // ============================================================
        db.execute_unprepared(BANK_DEPOSITS_SQL).await?;
        db.execute_unprepared(CASH_TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 8: ROW LEVEL SECURITY
        // ============================================================
        db.execute_unprepared(RLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE account_type AS ENUM ('asset', 'liability', 'equity', 'revenue', 'expense');
CREATE TYPE journal_status AS ENUM ('draft', 'pending', 'posted', 'voided');
CREATE TYPE approval_status AS ENUM ('pending', 'approved', 'rejected', 'queried', 'referred');
CREATE TYPE subject_type AS ENUM ('petty_cash', 'purchase_order', 'expense');
CREATE TYPE priority AS ENUM ('normal', 'high', 'urgent');
CREATE TYPE match_status AS ENUM ('matched', 'discrepancy', 'approved');
CREATE TYPE purchase_order_status AS ENUM ('draft', 'pending_approval', 'approved', 'executed', 'rejected');
CREATE TYPE vendor_invoice_status AS ENUM ('pending', 'matched');
CREATE TYPE referral_invoice_status AS ENUM ('pending', 'paid');
CREATE TYPE payment_method AS ENUM ('cash', 'bank_transfer', 'cheque');
CREATE TYPE deposit_status AS ENUM ('pending', 'verified', 'flagged');
CREATE TYPE deposit_method AS ENUM ('counter', 'transfer', 'cheque');
";

const TENANTS_SQL: &str = r"
CREATE TABLE tenants (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(50) NOT NULL UNIQUE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    subtype VARCHAR(50) NOT NULL,
    balance NUMERIC(18, 2) NOT NULL DEFAULT 0,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_accounts_tenant_code UNIQUE (tenant_id, code)
);

CREATE INDEX idx_accounts_tenant ON accounts(tenant_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    entry_number VARCHAR(20) NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    reference_type VARCHAR(50),
    reference_id VARCHAR(100),
    status journal_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL,
    posted_by UUID,
    posted_at TIMESTAMPTZ,
    voided_by UUID,
    voided_at TIMESTAMPTZ,
    void_reason TEXT,
    reversal_of UUID REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_journal_entries_tenant_number UNIQUE (tenant_id, entry_number)
);

CREATE INDEX idx_journal_entries_tenant_date ON journal_entries(tenant_id, entry_date);
CREATE INDEX idx_journal_entries_status ON journal_entries(tenant_id, status);
";

const JOURNAL_LINE_ITEMS_SQL: &str = r"
CREATE TABLE journal_line_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id),
    account_id UUID NOT NULL REFERENCES accounts(id),
    line_order INTEGER NOT NULL,
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    memo TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_line_one_side CHECK (
        (debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0)
    )
);

CREATE INDEX idx_line_items_entry ON journal_line_items(journal_entry_id);
CREATE INDEX idx_line_items_account ON journal_line_items(account_id);
";

const APPROVAL_THRESHOLDS_SQL: &str = r"
CREATE TABLE approval_thresholds (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    subject_type subject_type NOT NULL,
    role VARCHAR(50) NOT NULL,
    authority SMALLINT NOT NULL,
    max_amount NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_thresholds_tenant_subject_authority
        UNIQUE (tenant_id, subject_type, authority)
);
";

const APPROVAL_REQUESTS_SQL: &str = r"
CREATE TABLE approval_requests (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    subject_type subject_type NOT NULL,
    subject_id UUID NOT NULL,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    requester UUID NOT NULL,
    priority priority NOT NULL DEFAULT 'normal',
    justification TEXT NOT NULL,
    status approval_status NOT NULL DEFAULT 'pending',
    assigned_authority SMALLINT NOT NULL,
    assigned_role VARCHAR(50) NOT NULL,
    decided_by UUID,
    decided_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_approval_requests_tenant_status ON approval_requests(tenant_id, status);
CREATE INDEX idx_approval_requests_subject ON approval_requests(subject_type, subject_id);
";

const APPROVAL_EVENTS_SQL: &str = r"
CREATE TABLE approval_events (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    request_id UUID NOT NULL REFERENCES approval_requests(id),
    action VARCHAR(30) NOT NULL,
    actor UUID NOT NULL,
    detail TEXT,
    to_authority SMALLINT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_approval_events_request ON approval_events(request_id, created_at);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    order_number VARCHAR(30) NOT NULL,
    vendor_name VARCHAR(255) NOT NULL,
    total_amount NUMERIC(18, 2) NOT NULL CHECK (total_amount > 0),
    status purchase_order_status NOT NULL DEFAULT 'draft',
    created_by UUID NOT NULL,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_purchase_orders_tenant_number UNIQUE (tenant_id, order_number)
);
";

const GOODS_RECEIPTS_SQL: &str = r"
CREATE TABLE goods_receipts (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id),
    receipt_number VARCHAR(30) NOT NULL,
    received_by UUID NOT NULL,
    received_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_goods_receipts_tenant_number UNIQUE (tenant_id, receipt_number)
);
";

const VENDOR_INVOICES_SQL: &str = r"
CREATE TABLE vendor_invoices (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    invoice_number VARCHAR(50) NOT NULL,
    vendor_name VARCHAR(255) NOT NULL,
    total_amount NUMERIC(18, 2) NOT NULL CHECK (total_amount > 0),
    invoice_date DATE NOT NULL,
    status vendor_invoice_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_vendor_invoices_tenant_number UNIQUE (tenant_id, invoice_number)
);
";

const THREE_WAY_MATCHES_SQL: &str = r"
CREATE TABLE three_way_matches (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id),
    goods_receipt_id UUID NOT NULL REFERENCES goods_receipts(id),
    vendor_invoice_id UUID NOT NULL REFERENCES vendor_invoices(id),
    variance NUMERIC(18, 2) NOT NULL,
    tolerance NUMERIC(18, 2) NOT NULL,
    status match_status NOT NULL,
    created_by UUID NOT NULL,
    approved_by UUID,
    approved_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Each source document binds to at most one match
CREATE UNIQUE INDEX uq_match_po ON three_way_matches(purchase_order_id);
CREATE UNIQUE INDEX uq_match_receipt ON three_way_matches(goods_receipt_id);
CREATE UNIQUE INDEX uq_match_invoice ON three_way_matches(vendor_invoice_id);
";

const REFERRAL_PROVIDERS_SQL: &str = r"
CREATE TABLE referral_providers (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    name VARCHAR(255) NOT NULL,
    commission_rate NUMERIC(5, 2) NOT NULL CHECK (commission_rate >= 0 AND commission_rate <= 100),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const REFERRAL_INVOICES_SQL: &str = r"
CREATE TABLE referral_invoices (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    provider_id UUID NOT NULL REFERENCES referral_providers(id),
    invoice_number VARCHAR(30) NOT NULL,
    period_start DATE NOT NULL,
    period_end DATE NOT NULL,
    total_commission NUMERIC(18, 2) NOT NULL,
    status referral_invoice_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_referral_invoices_tenant_number UNIQUE (tenant_id, invoice_number),
    CONSTRAINT uq_referral_invoices_provider_period
        UNIQUE (tenant_id, provider_id, period_start, period_end)
);
";

const REFERRAL_INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE referral_invoice_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    referral_invoice_id UUID NOT NULL REFERENCES referral_invoices(id),
    billing_invoice_id UUID NOT NULL,
    test_id UUID NOT NULL,
    service_date DATE NOT NULL,
    price NUMERIC(18, 2) NOT NULL,
    commission NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_referral_items_invoice ON referral_invoice_items(referral_invoice_id);
";

const SETTLEMENTS_SQL: &str = r"
CREATE TABLE settlements (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    referral_invoice_id UUID NOT NULL REFERENCES referral_invoices(id),
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    method payment_method NOT NULL,
    journal_entry_id UUID REFERENCES journal_entries(id),
    settled_by UUID NOT NULL,
    settled_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- One settlement per referral invoice
CREATE UNIQUE INDEX uq_settlements_invoice ON settlements(referral_invoice_id);
";

const PROVIDER_LEDGER_SQL: &str = r"
CREATE TABLE provider_ledger_entries (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    provider_id UUID NOT NULL REFERENCES referral_providers(id),
    settlement_id UUID REFERENCES settlements(id),
    referral_invoice_id UUID REFERENCES referral_invoices(id),
    debit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(18, 2) NOT NULL DEFAULT 0,
    balance_after NUMERIC(18, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_provider_ledger_provider ON provider_ledger_entries(provider_id, created_at);
";

const BANK_DEPOSITS_SQL: &str = r"
CREATE TABLE bank_deposits (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    linked_cash_amount NUMERIC(18, 2) NOT NULL,
    method deposit_method NOT NULL,
    status deposit_status NOT NULL DEFAULT 'pending',
    discrepancy_amount NUMERIC(18, 2),
    discrepancy_reason TEXT,
    deposited_at TIMESTAMPTZ NOT NULL,
    verified_by UUID,
    verified_at TIMESTAMPTZ,
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_bank_deposits_tenant_status ON bank_deposits(tenant_id, status);
";

const CASH_TRANSACTIONS_SQL: &str = r"
CREATE TABLE cash_transactions (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL REFERENCES tenants(id),
    branch_id UUID,
    amount NUMERIC(18, 2) NOT NULL CHECK (amount > 0),
    collected_at TIMESTAMPTZ NOT NULL,
    is_verified BOOLEAN NOT NULL DEFAULT FALSE,
    deposit_id UUID REFERENCES bank_deposits(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_cash_transactions_tenant_collected ON cash_transactions(tenant_id, collected_at);
";

const RLS_SQL: &str = r"
-- ============================================================
-- ROW LEVEL SECURITY
-- Every tenant-scoped table is filtered by app.current_tenant_id
-- ============================================================

ALTER TABLE accounts ENABLE ROW LEVEL SECURITY;
ALTER TABLE journal_entries ENABLE ROW LEVEL SECURITY;
ALTER TABLE journal_line_items ENABLE ROW LEVEL SECURITY;
ALTER TABLE approval_thresholds ENABLE ROW LEVEL SECURITY;
ALTER TABLE approval_requests ENABLE ROW LEVEL SECURITY;
ALTER TABLE approval_events ENABLE ROW LEVEL SECURITY;
ALTER TABLE purchase_orders ENABLE ROW LEVEL SECURITY;
ALTER TABLE goods_receipts ENABLE ROW LEVEL SECURITY;
ALTER TABLE vendor_invoices ENABLE ROW LEVEL SECURITY;
ALTER TABLE three_way_matches ENABLE ROW LEVEL SECURITY;
ALTER TABLE referral_providers ENABLE ROW LEVEL SECURITY;
ALTER TABLE referral_invoices ENABLE ROW LEVEL SECURITY;
ALTER TABLE referral_invoice_items ENABLE ROW LEVEL SECURITY;
ALTER TABLE settlements ENABLE ROW LEVEL SECURITY;
ALTER TABLE provider_ledger_entries ENABLE ROW LEVEL SECURITY;
ALTER TABLE bank_deposits ENABLE ROW LEVEL SECURITY;
ALTER TABLE cash_transactions ENABLE ROW LEVEL SECURITY;

CREATE POLICY tenant_isolation_accounts ON accounts
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_journal_entries ON journal_entries
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_journal_line_items ON journal_line_items
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_approval_thresholds ON approval_thresholds
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_approval_requests ON approval_requests
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_approval_events ON approval_events
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_purchase_orders ON purchase_orders
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_goods_receipts ON goods_receipts
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_vendor_invoices ON vendor_invoices
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_three_way_matches ON three_way_matches
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_referral_providers ON referral_providers
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_referral_invoices ON referral_invoices
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_referral_invoice_items ON referral_invoice_items
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_settlements ON settlements
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_provider_ledger_entries ON provider_ledger_entries
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_bank_deposits ON bank_deposits
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);
CREATE POLICY tenant_isolation_cash_transactions ON cash_transactions
    USING (tenant_id = current_setting('app.current_tenant_id')::UUID);

ALTER TABLE accounts FORCE ROW LEVEL SECURITY;
ALTER TABLE journal_entries FORCE ROW LEVEL SECURITY;
ALTER TABLE journal_line_items FORCE ROW LEVEL SECURITY;
ALTER TABLE approval_thresholds FORCE ROW LEVEL SECURITY;
ALTER TABLE approval_requests FORCE ROW LEVEL SECURITY;
ALTER TABLE approval_events FORCE ROW LEVEL SECURITY;
ALTER TABLE purchase_orders FORCE ROW LEVEL SECURITY;
ALTER TABLE goods_receipts FORCE ROW LEVEL SECURITY;
ALTER TABLE vendor_invoices FORCE ROW LEVEL SECURITY;
ALTER TABLE three_way_matches FORCE ROW LEVEL SECURITY;
ALTER TABLE referral_providers FORCE ROW LEVEL SECURITY;
ALTER TABLE referral_invoices FORCE ROW LEVEL SECURITY;
ALTER TABLE referral_invoice_items FORCE ROW LEVEL SECURITY;
ALTER TABLE settlements FORCE ROW LEVEL SECURITY;
ALTER TABLE provider_ledger_entries FORCE ROW LEVEL SECURITY;
ALTER TABLE bank_deposits FORCE ROW LEVEL SECURITY;
ALTER TABLE cash_transactions FORCE ROW LEVEL SECURITY;
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS cash_transactions;
DROP TABLE IF EXISTS bank_deposits;
DROP TABLE IF EXISTS provider_ledger_entries;
DROP TABLE IF EXISTS settlements;
DROP TABLE IF EXISTS referral_invoice_items;
DROP TABLE IF EXISTS referral_invoices;
DROP TABLE IF EXISTS referral_providers;
DROP TABLE IF EXISTS three_way_matches;
DROP TABLE IF EXISTS vendor_invoices;
DROP TABLE IF EXISTS goods_receipts;
DROP TABLE IF EXISTS purchase_orders;
DROP TABLE IF EXISTS approval_events;
DROP TABLE IF EXISTS approval_requests;
DROP TABLE IF EXISTS approval_thresholds;
DROP TABLE IF EXISTS journal_line_items;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS tenants;

DROP TYPE IF EXISTS deposit_method;
DROP TYPE IF EXISTS deposit_status;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS referral_invoice_status;
DROP TYPE IF EXISTS vendor_invoice_status;
DROP TYPE IF EXISTS purchase_order_status;
DROP TYPE IF EXISTS match_status;
DROP TYPE IF EXISTS priority;
DROP TYPE IF EXISTS subject_type;
DROP TYPE IF EXISTS approval_status;
DROP TYPE IF EXISTS journal_status;
DROP TYPE IF EXISTS account_type;
";
