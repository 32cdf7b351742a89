//! CSV format handling for operation scripts and account output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain operations
//! - Account output serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Script Format
//!
//! ```text
//! op,account,amount,value,target,label
//! register,,,+992000000001,,
//! deposit,1,1000000,,,
//! pay,1,100000,auto,,p1
//! reject,,,,p1,
//! confirm,,,,p2,
//! repeat,,,,p1,p2
//! favorite,,,fuel,p1,f1
//! pay_favorite,,,,f1,p3
//! ```
//!
//! `value` carries the phone for `register`, the category for `pay` and the
//! favorite name for `favorite`.

use crate::types::{Account, AccountId, Money, Operation};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the script columns: op, account, amount, value, target, label.
/// Every column except `op` is optional at this level; which ones are
/// required depends on the operation.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub op: String,
    pub account: Option<AccountId>,
    pub amount: Option<String>,
    pub value: Option<String>,
    pub target: Option<String>,
    pub label: Option<String>,
}

/// Convert a CsvRecord to an Operation
///
/// This function:
/// - Parses the op string into an Operation variant (case insensitive)
/// - Parses the amount string into minor units (if present)
/// - Validates that the fields the operation needs are present
///
/// Amount sign is not checked here; non-positive amounts are a ledger error.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Operation) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<Operation, String> {
    let op = csv_record.op.trim().to_lowercase();

    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(amount_str) if !amount_str.is_empty() => match amount_str.parse::<Money>() {
            Ok(amount) => Some(amount),
            Err(_) => {
                return Err(format!(
                    "Invalid amount '{}' for {} operation",
                    amount_str, op
                ))
            }
        },
        _ => None,
    };

    let value = non_empty(csv_record.value);
    let target = non_empty(csv_record.target);
    let label = non_empty(csv_record.label);
    let account = csv_record.account;

    let operation = match op.as_str() {
        "register" => Operation::Register {
            phone: required(value, "value (phone)", &op)?,
        },
        "deposit" => Operation::Deposit {
            account: required(account, "account", &op)?,
            amount: required(amount, "amount", &op)?,
        },
        "pay" => Operation::Pay {
            account: required(account, "account", &op)?,
            amount: required(amount, "amount", &op)?,
            category: value.unwrap_or_default(),
            label,
        },
        "reject" => Operation::Reject {
            target: required(target, "target", &op)?,
        },
        "confirm" => Operation::Confirm {
            target: required(target, "target", &op)?,
        },
        "repeat" => Operation::Repeat {
            target: required(target, "target", &op)?,
            label,
        },
        "favorite" => Operation::Favorite {
            target: required(target, "target", &op)?,
            name: value.unwrap_or_default(),
            label,
        },
        "pay_favorite" => Operation::PayFavorite {
            target: required(target, "target", &op)?,
            label,
        },
        _ => return Err(format!("Invalid operation: '{}'", csv_record.op)),
    };

    Ok(operation)
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<T>(field: Option<T>, name: &str, op: &str) -> Result<T, String> {
    field.ok_or_else(|| format!("{} operation requires {}", op, name))
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: id, phone, balance
/// Rows follow the order of `accounts`; `Ledger::accounts` and
/// `Ledger::snapshot` already yield them sorted by id.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "phone", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record([
                account.id.to_string().as_str(),
                account.phone.as_str(),
                account.balance.to_string().as_str(),
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(op: &str, account: Option<AccountId>, amount: Option<&str>) -> CsvRecord {
        CsvRecord {
            op: op.to_string(),
            account,
            amount: amount.map(|s| s.to_string()),
            ..CsvRecord::default()
        }
    }

    #[rstest]
    #[case("deposit")]
    #[case("DEPOSIT")] // case insensitive
    #[case("  Deposit ")]
    fn test_convert_deposit(#[case] op: &str) {
        let result = convert_csv_record(record(op, Some(1), Some("1000000")));
        assert_eq!(
            result.unwrap(),
            Operation::Deposit {
                account: 1,
                amount: 1_000_000
            }
        );
    }

    #[test]
    fn test_convert_register_uses_value_as_phone() {
        let csv_record = CsvRecord {
            op: "register".to_string(),
            value: Some("+992000000001".to_string()),
            ..CsvRecord::default()
        };
        assert_eq!(
            convert_csv_record(csv_record).unwrap(),
            Operation::Register {
                phone: "+992000000001".to_string()
            }
        );
    }

    #[test]
    fn test_convert_pay_with_category_and_label() {
        let csv_record = CsvRecord {
            value: Some("auto".to_string()),
            label: Some("p1".to_string()),
            ..record("pay", Some(1), Some(" 100000 "))
        };
        assert_eq!(
            convert_csv_record(csv_record).unwrap(),
            Operation::Pay {
                account: 1,
                amount: 100_000,
                category: "auto".to_string(),
                label: Some("p1".to_string()),
            }
        );
    }

    #[test]
    fn test_convert_negative_amount_is_left_to_ledger() {
        let result = convert_csv_record(record("deposit", Some(1), Some("-5")));
        assert_eq!(
            result.unwrap(),
            Operation::Deposit {
                account: 1,
                amount: -5
            }
        );
    }

    #[rstest]
    #[case("reject")]
    #[case("confirm")]
    #[case("repeat")]
    #[case("favorite")]
    #[case("pay_favorite")]
    fn test_convert_target_operations(#[case] op: &str) {
        let csv_record = CsvRecord {
            op: op.to_string(),
            target: Some("p1".to_string()),
            value: Some("fuel".to_string()),
            ..CsvRecord::default()
        };
        let operation = convert_csv_record(csv_record).unwrap();
        assert_eq!(operation.name(), op);
    }

    #[rstest]
    #[case::invalid_op(record("withdraw", Some(1), Some("10")), "Invalid operation")]
    #[case::deposit_missing_amount(record("deposit", Some(1), None), "requires amount")]
    #[case::deposit_empty_amount(record("deposit", Some(1), Some("  ")), "requires amount")]
    #[case::deposit_missing_account(record("deposit", None, Some("10")), "requires account")]
    #[case::pay_invalid_amount(record("pay", Some(1), Some("10.50")), "Invalid amount")]
    #[case::register_missing_phone(record("register", None, None), "requires value (phone)")]
    #[case::reject_missing_target(record("reject", None, None), "requires target")]
    fn test_convert_csv_record_errors(#[case] csv_record: CsvRecord, #[case] expected_error: &str) {
        let result = convert_csv_record(csv_record);
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.contains(expected_error), "{}", error);
    }

    #[rstest]
    #[case::in_given_order(
        vec![
            Account { id: 1, phone: "+992000000001".to_string(), balance: 900000 },
            Account { id: 2, phone: "+992000000002".to_string(), balance: 0 },
        ],
        "id,phone,balance\n1,+992000000001,900000\n2,+992000000002,0\n"
    )]
    #[case::empty_accounts(vec![], "id,phone,balance\n")]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected_output: &str) {
        let mut output = Vec::new();
        let result = write_accounts_csv(&accounts, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }
}
