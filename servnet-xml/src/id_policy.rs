use servnet::diagnostic::Diagnostics;
use servnet::model::EntityKind;

/// identifier persisted for an emitted entity: the document id the
/// entity was read or built with when one is present, otherwise its
/// internal numeric handle rendered as a decimal string, reported
/// through the diagnostics sink. output stays fully self-referential
/// even for graphs assembled programmatically without ids.
///
/// emitters also sort their entities by this value, which makes
/// repeated emission of an unchanged graph byte-identical.
pub fn persisted_id(
    kind: EntityKind,
    source_id: &str,
    internal_id: usize,
    diagnostics: &mut Diagnostics,
) -> String {
    let trimmed = source_id.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    let synthesized = internal_id.to_string();
    diagnostics.warn(
        kind,
        synthesized.clone(),
        "entity carries no persisted id, falling back to its internal id",
    );
    synthesized
}
