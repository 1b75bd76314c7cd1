use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransactionRow<'a> {
    increment_id: &'a str,
    transaction_id: &'a str,
    status: &'a str,
    status_code: i32,
    amount: Decimal,
    currency: &'a str,
    payment_method: &'a str,
    payment_product_id: Option<u32>,
    fraud_result: &'a str,
    card_last_4: &'a str,
}

impl<'a> From<&'a TransactionRecord> for TransactionRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        let details = record.method_details.as_ref();
        Self {
            increment_id: &record.increment_id,
            transaction_id: &record.transaction_id,
            status: &record.status,
            status_code: record.status_code,
            amount: record.amount,
            currency: &record.currency,
            payment_method: details.and_then(|d| d.payment_method()).unwrap_or_default(),
            payment_product_id: details.map(|d| d.payment_product_id()),
            fraud_result: details.and_then(|d| d.fraud_result()).unwrap_or_default(),
            card_last_4: details.and_then(|d| d.card_last_4()).unwrap_or_default(),
        }
    }
}

/// Writes transaction history as CSV.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        for record in records {
            self.writer.serialize(TransactionRow::from(record))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::MethodDetails;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_records() {
        let records = vec![
            TransactionRecord {
                entity_id: Some(1),
                increment_id: "000000001".to_string(),
                transaction_id: "100_0".to_string(),
                status: "CAPTURED".to_string(),
                status_code: 9,
                amount: dec!(10.00),
                currency: "EUR".to_string(),
                method_details: Some(MethodDetails::Card {
                    fraud_result: Some("Accepted".to_string()),
                    payment_product_id: 1,
                    payment_method: Some("Cards".to_string()),
                    card_last_4: Some("4242".to_string()),
                }),
                created_at: Utc::now(),
            },
            TransactionRecord {
                entity_id: Some(2),
                increment_id: "000000001".to_string(),
                transaction_id: "100_0-R1".to_string(),
                status: "REFUNDED".to_string(),
                status_code: 8,
                amount: dec!(2.50),
                currency: "EUR".to_string(),
                method_details: None,
                created_at: Utc::now(),
            },
        ];

        let mut buffer = Vec::new();
        TransactionWriter::new(&mut buffer)
            .write_records(&records)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "increment_id,transaction_id,status,status_code,amount,currency,payment_method,payment_product_id,fraud_result,card_last_4"
        );
        assert_eq!(lines[1], "000000001,100_0,CAPTURED,9,10.00,EUR,Cards,1,Accepted,4242");
        assert_eq!(lines[2], "000000001,100_0-R1,REFUNDED,8,2.50,EUR,,,,");
    }
}
