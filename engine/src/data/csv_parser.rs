use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::encoding::{self, TextEncoding};
use super::report_table::ReportTable;
use crate::error::{EngineError, Result};

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Picks the delimiter that occurs most often in the header line.
/// Comma wins ties and headers without any candidate.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let mut best = (b',', 0usize);
    for delim in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|&b| b == delim).count();
        if count > best.1 {
            best = (delim, count);
        }
    }
    best.0
}

pub struct DelimitedReportParser;

impl DelimitedReportParser {
    /// Reads a delimited report from `file_path` decoded with `encoding`.
    ///
    /// Header: any columns, e.g. NUMERO_LAUDO;DATA;FROTA;PARECER;ANALISE;CONCLUSAO
    /// Example Row: 1234;15/01/2023;A1;BATERIA TROCADA;;OK
    pub fn load_table(file_path: &Path, encoding: TextEncoding) -> Result<ReportTable> {
        let bytes = std::fs::read(file_path)?;
        let text = encoding.decode(&bytes)?;
        Self::parse_text(&text)
    }

    pub fn parse_text(text: &str) -> Result<ReportTable> {
        if text.trim().is_empty() {
            return Err(EngineError::CsvDataFormatError("file has no header row".to_string()));
        }
        let delimiter = sniff_delimiter(text);
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = ReportTable::new(headers);

        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                EngineError::CsvDataFormatError(format!("error reading record at line {}: {}", idx + 2, e))
            })?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            table.rows.push(record.iter().map(|field| field.to_string()).collect());
        }
        Ok(table)
    }

    /// Writes the whole table as comma-separated UTF-8 with a BOM,
    /// replacing any existing file.
    pub fn write_table(file_path: &Path, table: &ReportTable) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(encoding::bom())?;
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            let padded: Vec<&str> = (0..table.headers.len().max(row.len()))
                .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                .collect();
            wtr.write_record(&padded)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("A;B;C\n1;2;3"), b';');
        assert_eq!(sniff_delimiter("A,B,C"), b',');
        assert_eq!(sniff_delimiter("A\tB"), b'\t');
        assert_eq!(sniff_delimiter("SINGLE"), b',');
    }

    #[test]
    fn test_load_semicolon_report() {
        let content = "\
NUMERO_LAUDO;DATA;FROTA;PARECER;ANALISE;CONCLUSAO
1234;15/01/2023;A1;BATERIA TROCADA;;OK
1235;01/06/2023;A1;\"TROCA; BATERIA\";;";
        let tmp = create_test_file(content.as_bytes());
        let table = DelimitedReportParser::load_table(tmp.path(), TextEncoding::Utf8).unwrap();

        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 3), "BATERIA TROCADA");
        assert_eq!(table.cell(1, 3), "TROCA; BATERIA");
    }

    #[test]
    fn test_ragged_and_blank_rows() {
        let content = "A,B,C\n1,2\n,,\n4,5,6,7\n";
        let table = DelimitedReportParser::parse_text(content).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(1, 3), "7");
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let err = DelimitedReportParser::parse_text("  \n").unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }

    #[test]
    fn test_latin1_needs_latin1_decoding() {
        let tmp = create_test_file(b"FROTA,CONCLUS\xC3O\nA1,CONCLU\xCDDO\n");
        assert!(DelimitedReportParser::load_table(tmp.path(), TextEncoding::Utf8).is_err());
        let table = DelimitedReportParser::load_table(tmp.path(), TextEncoding::Latin1).unwrap();
        assert_eq!(table.headers[1], "CONCLUSÃO");
        assert_eq!(table.cell(0, 1), "CONCLUÍDO");
    }

    #[test]
    fn test_write_table_starts_with_bom_and_reads_back() {
        let tmp = NamedTempFile::new().unwrap();
        let mut table = ReportTable::new(vec!["FROTA".into(), "PARECER".into()]);
        table.rows.push(vec!["A1".into(), "BATERIA, TROCADA".into()]);
        table.rows.push(vec!["B2".into()]);
        DelimitedReportParser::write_table(tmp.path(), &table).unwrap();

        let bytes = std::fs::read(tmp.path()).unwrap();
        assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
        let back = DelimitedReportParser::load_table(tmp.path(), TextEncoding::Utf8).unwrap();
        assert_eq!(back.headers, table.headers);
        assert_eq!(back.cell(0, 1), "BATERIA, TROCADA");
        assert_eq!(back.cell(1, 1), "");
    }
}
