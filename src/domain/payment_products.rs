//! Static catalogue of Worldline payment products.
//!
//! Maps the numeric `paymentProductId` reported by the vendor to a display label
//! and the payment-method group shown in the transaction history.

use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PaymentProduct {
    pub id: u32,
    pub label: &'static str,
    pub group: &'static str,
}

pub const GROUP_CARDS: &str = "Cards";
pub const GROUP_MOBILE: &str = "Mobile";
pub const GROUP_E_WALLET: &str = "e-Wallet";
pub const GROUP_REALTIME_BANKING: &str = "Real-time Banking";
pub const GROUP_DIRECT_DEBIT: &str = "Direct Debit";
pub const GROUP_POSTPAID: &str = "Postpaid";
pub const GROUP_PREPAID: &str = "Prepaid";
pub const GROUP_INSTALMENT: &str = "Instalment";
pub const GROUP_GIFT_CARD: &str = "Gift Card";

#[rustfmt::skip]
const PRODUCTS: &[PaymentProduct] = &[
    PaymentProduct { id: 1, label: "Visa", group: GROUP_CARDS },
    PaymentProduct { id: 2, label: "American Express", group: GROUP_CARDS },
    PaymentProduct { id: 3, label: "MasterCard", group: GROUP_CARDS },
    PaymentProduct { id: 56, label: "UnionPay International", group: GROUP_CARDS },
    PaymentProduct { id: 117, label: "Maestro", group: GROUP_CARDS },
    PaymentProduct { id: 125, label: "JCB", group: GROUP_CARDS },
    PaymentProduct { id: 130, label: "Carte Bancaire", group: GROUP_CARDS },
    PaymentProduct { id: 132, label: "Diners Club", group: GROUP_CARDS },
    PaymentProduct { id: 302, label: "Apple Pay", group: GROUP_MOBILE },
    PaymentProduct { id: 320, label: "Google Pay", group: GROUP_MOBILE },
    PaymentProduct { id: 771, label: "SEPA Direct Debit", group: GROUP_DIRECT_DEBIT },
    PaymentProduct { id: 809, label: "iDEAL", group: GROUP_REALTIME_BANKING },
    PaymentProduct { id: 840, label: "PayPal", group: GROUP_E_WALLET },
    PaymentProduct { id: 861, label: "Alipay", group: GROUP_MOBILE },
    PaymentProduct { id: 863, label: "WeChat Pay", group: GROUP_MOBILE },
    PaymentProduct { id: 3012, label: "Bancontact", group: GROUP_CARDS },
    PaymentProduct { id: 3112, label: "Illicado", group: GROUP_GIFT_CARD },
    PaymentProduct { id: 3124, label: "Przelewy24", group: GROUP_REALTIME_BANKING },
    PaymentProduct { id: 3301, label: "Klarna Pay Now", group: GROUP_REALTIME_BANKING },
    PaymentProduct { id: 3302, label: "Klarna Pay Later", group: GROUP_POSTPAID },
    PaymentProduct { id: 5001, label: "Bizum", group: GROUP_MOBILE },
    PaymentProduct { id: 5110, label: "Oney 3x-4x", group: GROUP_INSTALMENT },
    PaymentProduct { id: 5125, label: "Oney Financement Long", group: GROUP_INSTALMENT },
    PaymentProduct { id: 5402, label: "Mealvouchers", group: GROUP_PREPAID },
    PaymentProduct { id: 5403, label: "Cheque-Vacances Connect", group: GROUP_PREPAID },
    PaymentProduct { id: 5407, label: "Twint", group: GROUP_MOBILE },
    PaymentProduct { id: 5408, label: "Bank transfer by Worldline", group: GROUP_REALTIME_BANKING },
    PaymentProduct { id: 5500, label: "Multibanco", group: GROUP_POSTPAID },
];

static PAYMENT_PRODUCTS: LazyLock<HashMap<u32, PaymentProduct>> =
    LazyLock::new(|| PRODUCTS.iter().map(|product| (product.id, *product)).collect());

pub fn payment_product(id: u32) -> Option<&'static PaymentProduct> {
    PAYMENT_PRODUCTS.get(&id)
}

/// Payment-method group for a product id, `None` when the id is not catalogued.
pub fn payment_method_group(id: u32) -> Option<&'static str> {
    payment_product(id).map(|product| product.group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some(GROUP_CARDS))]
    #[case(771, Some(GROUP_DIRECT_DEBIT))]
    #[case(840, Some(GROUP_E_WALLET))]
    #[case(809, Some(GROUP_REALTIME_BANKING))]
    #[case(999_999, None)]
    fn test_payment_method_group(#[case] id: u32, #[case] expected: Option<&str>) {
        assert_eq!(payment_method_group(id), expected);
    }

    #[test]
    fn test_product_ids_are_unique() {
        assert_eq!(PAYMENT_PRODUCTS.len(), PRODUCTS.len());
    }

    #[test]
    fn test_payment_product_label() {
        let product = payment_product(3).unwrap();
        assert_eq!(product.label, "MasterCard");
    }
}
