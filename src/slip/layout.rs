//! Line layouts of the HUB1 and HUB3 slip payloads

use crate::models::SlipFormat;

/// One slip field, in payload terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Format discriminator
    Header,
    /// `HRK` or `EUR`
    Currency,
    /// Amount text
    Amount,
    /// Payer name
    PayerName,
    /// Payer street address
    PayerAddress,
    /// Payer postal code and place (HUB3)
    PayerDetailedAddress,
    /// Recipient name
    RecipientName,
    /// Recipient street address
    RecipientAddress,
    /// Recipient postal code and place (HUB3)
    RecipientDetailedAddress,
    /// `bank-account` pair or IBAN (HUB1)
    Account,
    /// Recipient IBAN (HUB3)
    Iban,
    /// Reference model, `HR` and two digits
    ReferenceModel,
    /// Reference number
    Reference,
    /// Four letter purpose code
    PurposeCode,
    /// Description code (HUB1)
    DescriptionCode,
    /// Payment description
    Description,
    /// Due date (HUB3, optional)
    DueDate,
    /// Trailing optional data (HUB3, optional)
    OptionalData,
}

/// Positional field layout of one slip format
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    /// Format this layout belongs to
    pub format: SlipFormat,
    /// Discriminator on the first line
    pub header: &'static str,
    /// Field per line index
    pub fields: &'static [Field],
    /// Lines every payload must carry
    pub required: usize,
}

/// HUB3 (`HRVHUB30`): detailed addresses, IBAN, due date and optional data
pub static HUB3: Layout = Layout {
    format: SlipFormat::Hub3,
    header: "HRVHUB30",
    fields: &[
        Field::Header,
        Field::Currency,
        Field::Amount,
        Field::PayerName,
        Field::PayerAddress,
        Field::PayerDetailedAddress,
        Field::RecipientName,
        Field::RecipientAddress,
        Field::RecipientDetailedAddress,
        Field::Iban,
        Field::ReferenceModel,
        Field::Reference,
        Field::PurposeCode,
        Field::Description,
        Field::DueDate,
        Field::OptionalData,
    ],
    required: 14,
};

/// HUB1 (`HRVHUB10`): bank and account pair, description code
pub static HUB1: Layout = Layout {
    format: SlipFormat::Hub1,
    header: "HRVHUB10",
    fields: &[
        Field::Header,
        Field::Currency,
        Field::Amount,
        Field::PayerName,
        Field::PayerAddress,
        Field::RecipientName,
        Field::RecipientAddress,
        Field::Account,
        Field::ReferenceModel,
        Field::Reference,
        Field::PurposeCode,
        Field::DescriptionCode,
        Field::Description,
    ],
    required: 13,
};

impl Layout {
    /// Layout whose discriminator matches the first payload line
    pub fn for_header(line: &str) -> Option<&'static Layout> {
        [&HUB3, &HUB1]
            .into_iter()
            .find(|layout| line.trim() == layout.header)
    }

    /// Field on line `index`; trailing lines past the layout belong to the last field
    pub fn field_at(&self, index: usize) -> Option<Field> {
        match self.fields.get(index) {
            Some(&field) => Some(field),
            None if self.has_trailing_data() => self.fields.last().copied(),
            None => None,
        }
    }

    /// Line index of `field`
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|&f| f == field)
    }

    /// Whether lines beyond the required ones may follow
    pub fn has_trailing_data(&self) -> bool {
        self.fields.len() > self.required
    }
}
