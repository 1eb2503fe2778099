/// One scanned row of a PDF417 symbol
///
/// Codewords are `None` where the bar pattern could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdf417Row {
    /// Cluster the row's patterns belong to (0, 3 or 6)
    pub cluster: u8,
    /// Left row indicator codeword
    pub left_indicator: Option<u16>,
    /// Data region codewords, left to right
    pub codewords: Vec<Option<u16>>,
    /// Right row indicator codeword
    pub right_indicator: Option<u16>,
}

impl Pdf417Row {
    /// Row with every codeword classified
    pub fn new(cluster: u8, left: u16, codewords: Vec<u16>, right: u16) -> Self {
        Self {
            cluster,
            left_indicator: Some(left),
            codewords: codewords.into_iter().map(Some).collect(),
            right_indicator: Some(right),
        }
    }
}

/// Row scans of one isolated PDF417 symbol, top to bottom
///
/// Rows that were not printed or not scanned are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pdf417Symbol {
    /// Scanned rows
    pub rows: Vec<Pdf417Row>,
}

impl Pdf417Symbol {
    /// Symbol from scanned rows
    pub fn new(rows: Vec<Pdf417Row>) -> Self {
        Self { rows }
    }
}
