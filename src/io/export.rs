use std::io::Write;

use anyhow::Result;

use crate::application::LedgerService;
use crate::domain::{TransactionFilter, format_cents};

/// Exporter for converting ledger data to CSV. Fields containing the
/// delimiter are quoted by the writer, so free-text categories and notes
/// round-trip through spreadsheet tools.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all transactions, one row per record in insertion order.
    /// Returns the number of data rows written.
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "type", "category", "amount", "date", "note"])?;

        let mut count = 0;
        for transaction in self.service.transactions() {
            csv_writer.write_record([
                transaction.id.to_string(),
                transaction.kind.as_str().to_string(),
                transaction.category.clone(),
                format_cents(transaction.amount_cents),
                transaction.date_str(),
                transaction.note.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the per-category expense distribution for the given filter.
    /// Returns the number of data rows written.
    pub fn export_breakdown_csv<W: Write>(
        &self,
        writer: W,
        filter: &TransactionFilter,
    ) -> Result<usize> {
        let report = self.service.breakdown_report(filter);
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "amount"])?;

        let mut count = 0;
        for share in &report.categories {
            csv_writer.write_record([share.category.clone(), format_cents(share.total)])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
