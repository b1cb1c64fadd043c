// ============================================================
// CSV PARSER
// ============================================================
// Decode and parse the reference dataset into a header + records table

use crate::domain::csv::{CsvRecord, CsvTable};
use crate::domain::error::AppError;
use csv::{ReaderBuilder, StringRecord, Trim};

/// Quote-aware CSV parser
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from headers and values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Decode raw bytes, then parse.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<CsvTable, AppError> {
        let content = decode(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content. Rows may have any width; width policy is left to
    /// the caller. Blank lines are not records.
    pub fn parse_content(&self, content: &str) -> Result<CsvTable, AppError> {
        let content = skip_leading_blank_lines(content);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if is_blank(&record) {
                continue;
            }

            records.push(CsvRecord::new(
                records.len(),
                record.iter().map(str::to_string).collect(),
            ));
        }

        // A header made of one empty cell means the file had no header line.
        if headers.len() == 1 && headers[0].is_empty() {
            return Ok(CsvTable::new(Vec::new(), records));
        }

        Ok(CsvTable::new(headers, records))
    }
}

/// The header is the first line with content.
fn skip_leading_blank_lines(content: &str) -> &str {
    let mut rest = content;
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}

/// A whitespace-only line parses as a single empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// UTF-8 first (BOM stripped); anything else is read as Windows-1252.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            content.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "Crop,District,Soil\nRice,Puri,RED SOIL\nWheat,Cuttack,BLACK SOIL";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.headers, vec!["Crop", "District", "Soil"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1].get(1), Some("Cuttack"));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let content = "Crop,District\r\n\r\nRice,Puri\r\n   \r\nMaize,Boudh\r\n";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1].index, 1);
        assert_eq!(table.records[1].get(0), Some("Maize"));
    }

    #[test]
    fn test_blank_lines_before_header_are_skipped() {
        let content = "   \n\r\n\nCrop,District,Soil\nRice,Puri,RED SOIL\n";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.headers, vec!["Crop", "District", "Soil"]);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].get(2), Some("RED SOIL"));
    }

    #[test]
    fn test_whitespace_only_content_has_no_header() {
        let table = CsvParser::new().parse_content("  \n   ").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_quoted_field_keeps_commas() {
        let content = "Crop,District,Soil\nRice,Puri,\"RED SOIL, SANDY\"";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.records[0].width(), 3);
        assert_eq!(table.records[0].get(2), Some("RED SOIL, SANDY"));
    }

    #[test]
    fn test_short_rows_are_kept_for_caller() {
        let content = "Crop,District,Soil\nRice,Puri";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.records[0].width(), 2);
    }

    #[test]
    fn test_empty_content() {
        let table = CsvParser::new().parse_content("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_latin1_fallback_and_bom() {
        let bytes = b"\xEF\xBB\xBFCrop,District\nRice,Puri";
        let table = CsvParser::new().parse_bytes(bytes).unwrap();
        assert_eq!(table.headers[0], "Crop");

        let bytes = b"Crop,District\nRice,Bal\xE9sore";
        let table = CsvParser::new().parse_bytes(bytes).unwrap();
        assert_eq!(table.records[0].get(1), Some("Bal\u{e9}sore"));
    }

    #[test]
    fn test_custom_delimiter() {
        let table = CsvParser::new()
            .with_delimiter(b';')
            .parse_content("Crop;District\nRice;Puri")
            .unwrap();
        assert_eq!(table.records[0].get(1), Some("Puri"));
    }
}
