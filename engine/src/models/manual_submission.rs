// A manual report submission, before it becomes one entry per fleet unit.
use serde::{Deserialize, Serialize};
use shared::columns;
use shared::models::ReportEntry;
use shared::utils::brazilian_format;

use crate::error::{EngineError, FieldError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSubmission {
    pub numero_laudo: String,
    /// Day-first date, e.g. "10/05/2024".
    pub data: String,
    /// One or more unit ids separated by commas, e.g. "4000,437".
    pub frota: String,
    pub parecer: String,
    pub analise: String,
    pub conclusao: String,
}

impl ManualSubmission {
    pub fn frota_tokens(&self) -> Vec<&str> {
        self.frota.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
    }

    /// Checks every required field and reports all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.numero_laudo.trim().is_empty() {
            errors.push(FieldError {
                field: columns::NUMERO_LAUDO,
                message: "required".to_string(),
            });
        }
        if self.data.trim().is_empty() {
            errors.push(FieldError {
                field: columns::DATA,
                message: "required".to_string(),
            });
        } else if brazilian_format::parse_date(&self.data).is_none() {
            errors.push(FieldError {
                field: columns::DATA,
                message: format!("'{}' is not a dd/mm/yyyy date", self.data.trim()),
            });
        }
        if self.frota_tokens().is_empty() {
            errors.push(FieldError {
                field: columns::FROTA,
                message: "at least one unit is required".to_string(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(errors))
        }
    }

    /// One entry per unit id, sharing the trimmed narrative and the date
    /// normalized to dd/mm/yyyy.
    pub fn into_entries(&self) -> Result<Vec<ReportEntry>> {
        self.validate()?;
        let data = brazilian_format::parse_date(&self.data)
            .map(brazilian_format::format_date)
            .ok_or_else(|| EngineError::ProcessingError("date vanished after validation".to_string()))?;
        Ok(self
            .frota_tokens()
            .into_iter()
            .map(|frota| ReportEntry {
                numero_laudo: self.numero_laudo.trim().to_string(),
                data: data.clone(),
                frota: frota.to_string(),
                parecer: self.parecer.trim().to_string(),
                analise: self.analise.trim().to_string(),
                conclusao: self.conclusao.trim().to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(laudo: &str, data: &str, frota: &str) -> ManualSubmission {
        ManualSubmission {
            numero_laudo: laudo.into(),
            data: data.into(),
            frota: frota.into(),
            parecer: "  BATERIA TROCADA ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn expands_one_entry_per_unit() {
        let entries = submission("9999", "10/05/2024", "A1, B2 ,,").into_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].frota, "A1");
        assert_eq!(entries[1].frota, "B2");
        assert_eq!(entries[0].parecer, "BATERIA TROCADA");
        assert_eq!(entries[0].data, "10/05/2024");
        let mut second = entries[1].clone();
        second.frota = "A1".into();
        assert_eq!(second, entries[0]);
    }

    #[test]
    fn date_is_normalized() {
        let entries = submission("1", "2024-05-10", "A1").into_entries().unwrap();
        assert_eq!(entries[0].data, "10/05/2024");
    }

    #[test]
    fn missing_fields_are_reported_per_field() {
        let err = submission(" ", "", " , ").validate().unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["NUMERO_LAUDO", "DATA", "FROTA"]);
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = submission("1", "31/02/2024", "A1").into_entries().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "DATA");
    }
}
