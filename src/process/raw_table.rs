#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names exactly as the header row spells them (stray whitespace included).
    pub headers: Vec<String>,
    /// Each data row, one String per field. Short rows are padded with empty fields.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
