//! Structural checks and normalization of individual slip fields

use chrono::NaiveDate;

use crate::error::FieldError;

/// Length of a Croatian IBAN
pub const HR_IBAN_LEN: usize = 21;
const BANK_CODE_LEN: usize = 7;
const ACCOUNT_LEN: usize = 10;
const MAX_AMOUNT_DIGITS: usize = 15;

/// Bank code and account number behind a Croatian IBAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Normalized IBAN
    pub iban: String,
    /// 7-digit bank code
    pub bank_code: String,
    /// 10-digit account number
    pub account_number: String,
}

/// Strip spaces and upper-case an IBAN
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// ISO 7064 mod-97 remainder of the rearranged IBAN
fn mod97(rearranged: &str) -> Option<u32> {
    let mut rem = 0u32;
    for c in rearranged.chars() {
        let value = c.to_digit(36)?;
        rem = if value < 10 {
            (rem * 10 + value) % 97
        } else {
            (rem * 100 + value) % 97
        };
    }
    Some(rem)
}

/// Validate a Croatian IBAN and split it into bank code and account number
pub fn parse_iban(raw: &str) -> Result<Account, FieldError> {
    let iban = normalize_iban(raw);
    if iban.is_empty() {
        return Err(FieldError::MissingIban);
    }
    if iban.len() != HR_IBAN_LEN || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FieldError::MalformedIban(iban));
    }
    if !iban.starts_with("HR") {
        return Err(FieldError::ForeignIban(iban));
    }
    if !iban[2..].bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::MalformedIban(iban));
    }
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    if mod97(&rearranged) != Some(1) {
        return Err(FieldError::IbanChecksum(iban));
    }
    Ok(Account {
        bank_code: iban[4..4 + BANK_CODE_LEN].to_string(),
        account_number: iban[4 + BANK_CODE_LEN..].to_string(),
        iban,
    })
}

/// IBAN for a bank code and account number, with computed check digits
pub fn iban_from_account(bank_code: &str, account_number: &str) -> Option<String> {
    let check = 98 - mod97(&format!("{bank_code}{account_number}HR00"))?;
    Some(format!("HR{check:02}{bank_code}{account_number}"))
}

/// A HUB1 account field: `bank-account` pair or IBAN
pub fn parse_account(raw: &str) -> Result<Account, FieldError> {
    let trimmed = raw.trim();
    let Some((bank, account)) = trimmed.split_once('-') else {
        return parse_iban(trimmed);
    };
    let (bank, account) = (bank.trim(), account.trim());
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(bank, BANK_CODE_LEN) || !digits(account, ACCOUNT_LEN) {
        return Err(FieldError::MalformedAccount(trimmed.to_string()));
    }
    let iban = iban_from_account(bank, account)
        .ok_or_else(|| FieldError::MalformedAccount(trimmed.to_string()))?;
    Ok(Account {
        iban,
        bank_code: bank.to_string(),
        account_number: account.to_string(),
    })
}

/// Currency carried by a slip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    /// Croatian kuna
    Hrk,
    /// Euro
    Eur,
}

/// Parse the currency line
pub fn parse_currency(raw: &str) -> Result<Currency, FieldError> {
    match raw.trim() {
        "HRK" => Ok(Currency::Hrk),
        "EUR" => Ok(Currency::Eur),
        other => Err(FieldError::Currency(other.to_string())),
    }
}

/// Amount in minor units
///
/// Accepts up to 15 digits of minor units or a decimal with exactly two
/// fraction digits after `,` or `.`. An empty amount is zero.
pub fn parse_amount(raw: &str) -> Result<i64, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0);
    }
    let malformed = || FieldError::Amount(text.to_string());
    let digits: String = match text.find([',', '.']) {
        None => text.to_string(),
        Some(pos) => {
            let (whole, fraction) = (&text[..pos], &text[pos + 1..]);
            if fraction.len() != 2 || whole.is_empty() {
                return Err(malformed());
            }
            format!("{whole}{fraction}")
        }
    };
    if digits.is_empty()
        || digits.len() > MAX_AMOUNT_DIGITS + 2
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }
    let value: i64 = digits.parse().map_err(|_| malformed())?;
    if value >= 10i64.pow(MAX_AMOUNT_DIGITS as u32) {
        return Err(malformed());
    }
    Ok(value)
}

/// Parse a due date in `DDMMYYYY` or `DD.MM.YYYY` form
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let text = raw.trim();
    let (format, len) = if text.contains('.') {
        ("%d.%m.%Y", 10)
    } else {
        ("%d%m%Y", 8)
    };
    if text.len() != len {
        return Err(FieldError::DueDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, format).map_err(|_| FieldError::DueDate(text.to_string()))
}

/// Render a due date as `DDMMYYYY`
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

/// `HR` followed by two digits; empty passes
pub fn check_reference_model(raw: &str) -> Result<(), FieldError> {
    let text = raw.trim();
    let ok = text.is_empty()
        || (text.len() == 4
            && text.starts_with("HR")
            && text[2..].bytes().all(|b| b.is_ascii_digit()));
    if ok {
        Ok(())
    } else {
        Err(FieldError::ReferenceModel(text.to_string()))
    }
}

/// Four upper-case letters; empty passes
pub fn check_purpose_code(raw: &str) -> Result<(), FieldError> {
    let text = raw.trim();
    if text.is_empty() || (text.len() == 4 && text.bytes().all(|b| b.is_ascii_uppercase())) {
        Ok(())
    } else {
        Err(FieldError::PurposeCode(text.to_string()))
    }
}
