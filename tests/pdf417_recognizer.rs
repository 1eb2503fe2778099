//! End-to-end recognition of PDF417 payment slips from row scans

mod common;

use common::{
    HUB1_HRK, HUB3_EUR, HUB3_HRK, IBAN, UNKNOWN_FORMAT, init_tracing, pdf417_symbol,
    pdf417_text_symbol, without_row,
};
use croatia_payment::decoder::pdf417::Pdf417Decoder;
use croatia_payment::slip::format_due_date;
use croatia_payment::{
    Pdf417PaymentRecognizer, Pdf417Settings, PaymentRecord, ResultState, Rounding, SlipFormat,
};

fn recognizer(settings: Pdf417Settings) -> Pdf417PaymentRecognizer {
    init_tracing();
    Pdf417PaymentRecognizer::new(settings).unwrap()
}

#[test]
fn test_hub3_hrk_slip() {
    let recognizer = recognizer(Pdf417Settings::default());
    let symbol = pdf417_symbol(HUB3_HRK.as_bytes(), 5, 2);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert_eq!(record.amount_hrk, 12345);
    assert_eq!(record.amount_eur, 1639);
    assert!(record.conversion_to_eur_performed);
    assert_eq!(record.slip_id, Some(SlipFormat::Hub3));
    assert_eq!(record.iban, IBAN);
    assert_eq!(record.bank_code, "1001005");
    assert_eq!(record.account_number, "1863000160");
    assert_eq!(record.payer_name, "Ivan Horvat");
    assert_eq!(record.recipient_detailed_address, "10000 Zagreb");
    assert_eq!(record.reference, "1234-5678-9");
    assert_eq!(record.payment_description, "Placanje racuna 42");
    assert_eq!(
        record.due_date.map(format_due_date).as_deref(),
        Some("31122024")
    );
    assert!(!record.uncertain);
}

#[test]
fn test_hub3_eur_slip_derives_hrk() {
    let recognizer = recognizer(Pdf417Settings::default().with_rounding(Rounding::HalfEven));
    let symbol = pdf417_symbol(HUB3_EUR.as_bytes(), 6, 3);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert_eq!(record.amount_eur, 2500);
    // 2500 * 7.5345 = 18836.25
    assert_eq!(record.amount_hrk, 18836);
    assert!(!record.conversion_to_eur_performed);
    assert!(record.due_date.is_none());
}

#[test]
fn test_hub1_slip() {
    let recognizer = recognizer(Pdf417Settings::default());
    let symbol = pdf417_symbol(HUB1_HRK.as_bytes(), 4, 2);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert_eq!(record.slip_id, Some(SlipFormat::Hub1));
    assert_eq!(record.iban, IBAN);
    assert!(record.due_date.is_none());
    assert!(record.payer_detailed_address.is_empty());
    assert!(record.recipient_detailed_address.is_empty());
    assert!(record.optional_data.is_empty());
}

#[test]
fn test_missing_row_within_error_correction() {
    let recognizer = recognizer(Pdf417Settings::default().with_uncertain_decoding(false));
    let symbol = without_row(&pdf417_symbol(HUB3_HRK.as_bytes(), 5, 4), 6);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert_eq!(record.payer_name, "Ivan Horvat");
    assert!(!record.uncertain);
}

#[test]
fn test_missing_row_beyond_error_correction_is_uncertain() {
    let recognizer = recognizer(Pdf417Settings::default());
    // row 6 carries the codewords of bytes 30..42: the payer name and address
    let symbol = without_row(&pdf417_symbol(HUB3_HRK.as_bytes(), 5, 0), 6);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert!(record.uncertain);
    assert_eq!(record.payer_name, "");
    assert_eq!(record.payer_address, "");
    assert_eq!(record.payer_detailed_address, "10000 Zagreb");
    assert_eq!(record.iban, IBAN);
    assert_eq!(record.amount_hrk, 12345);
    assert_eq!(record.amount_eur, 1639);
}

#[test]
fn test_missing_description_row_keeps_slip() {
    let recognizer = recognizer(Pdf417Settings::default());
    // row 26 carries bytes 150..162, inside the payment description
    let symbol = without_row(&pdf417_symbol(HUB3_HRK.as_bytes(), 5, 0), 26);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert!(record.uncertain);
    assert_eq!(record.payment_description, "");
    // the due date follows the damage and cannot be placed
    assert!(record.due_date.is_none());
    assert_eq!(record.payer_name, "Ivan Horvat");
    assert_eq!(record.purpose_code, "COST");
    assert_eq!(record.iban, IBAN);
    assert_eq!(record.amount_hrk, 12345);
    assert_eq!(record.amount_eur, 1639);
}

#[test]
fn test_missing_text_row_resumes_after_lost_latch() {
    let recognizer = recognizer(Pdf417Settings::default());
    // row 12 holds the end of the recipient address, lower-case latch included
    let symbol = without_row(&pdf417_text_symbol(HUB3_HRK, 5, 0), 12);

    let readings = Pdf417Decoder::readings(&symbol).unwrap();
    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|r| !r.is_verified()));

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert!(record.uncertain);
    assert_eq!(record.recipient_name, "Tvrtka d.o.o.");
    assert_eq!(record.recipient_address, "");
    assert_eq!(record.recipient_detailed_address, "");
    assert_eq!(record.iban, IBAN);
    assert_eq!(record.payment_description, "Placanje racuna 42");
    assert_eq!(record.due_date.map(format_due_date).as_deref(), Some("31122024"));
    assert_eq!(record.amount_eur, 1639);
}

#[test]
fn test_text_compacted_slip() {
    let recognizer = recognizer(Pdf417Settings::default());
    let symbol = pdf417_text_symbol(HUB3_EUR, 6, 2);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Valid));
    let record = recognizer.result();
    assert_eq!(record.payer_name, "Ana Kovac");
    assert_eq!(record.recipient_name, "Komunalac d.o.o.");
    assert_eq!(record.amount_eur, 2500);
    assert!(!record.uncertain);
}

#[test]
fn test_missing_row_without_uncertain_decoding_is_empty() {
    let recognizer = recognizer(Pdf417Settings::default().with_uncertain_decoding(false));
    let symbol = without_row(&pdf417_symbol(HUB3_HRK.as_bytes(), 5, 0), 6);

    let state = recognizer.recognize(&symbol).unwrap();
    assert!(matches!(state, ResultState::Empty | ResultState::Invalid));
    assert!(!state.is_valid());
    assert!(recognizer.result().is_blank());
}

#[test]
fn test_unknown_format_is_invalid() {
    let recognizer = recognizer(Pdf417Settings::default());
    let symbol = pdf417_symbol(UNKNOWN_FORMAT.as_bytes(), 3, 1);

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Invalid));
    assert_eq!(recognizer.result(), PaymentRecord::with_state(ResultState::Invalid));
}

#[test]
fn test_no_rows_is_empty() {
    let recognizer = recognizer(Pdf417Settings::default());
    let symbol = croatia_payment::Pdf417Symbol::default();

    assert_eq!(recognizer.recognize(&symbol), Ok(ResultState::Empty));
    assert_eq!(recognizer.result(), PaymentRecord::default());
}
