use std::fmt::Display;

use crate::model::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// one structured record of a recoverable condition met while reading or
/// writing a document: which entity, how bad, what happened.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: EntityKind,
    pub entity: String,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}': {}", self.kind, self.entity, self.message)
    }
}

/// collecting sink for diagnostics, passed into every reader and writer
/// call. records are kept in emission order for the caller to render or
/// aggregate; each record is additionally mirrored to the `log` facade.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics { records: vec![] }
    }

    pub fn warn(&mut self, kind: EntityKind, entity: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, kind, entity.into(), message.into());
    }

    pub fn info(&mut self, kind: EntityKind, entity: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Info, kind, entity.into(), message.into());
    }

    fn push(&mut self, severity: Severity, kind: EntityKind, entity: String, message: String) {
        let record = Diagnostic {
            severity,
            kind,
            entity,
            message,
        };
        match severity {
            Severity::Info => log::info!("{}", record),
            Severity::Warning => log::warn!("{}", record),
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records
            .iter()
            .filter(|record| record.severity == Severity::Warning)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_records_keep_emission_order_and_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(EntityKind::RoutedService, "svc1", "adopted implicit mode");
        diagnostics.warn(EntityKind::ServiceNode, "s9", "unknown node reference");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(
            diagnostics.records()[1].to_string(),
            "service node 's9': unknown node reference"
        );
    }
}
