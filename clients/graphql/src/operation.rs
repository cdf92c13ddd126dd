use juniper::{parser::parse_document_source, Definition, Operation, OperationType, ScalarValue};

use crate::schema::ReadOnlySchema;

/// Type of the operation a request would run against `schema`
///
/// Returns `None` when the document does not parse or no single operation can be picked (unknown
/// name, or several operations and no name). juniper reports those cases on its own.
pub fn operation_type(
    schema: &ReadOnlySchema,
    document: &str,
    operation_name: Option<&str>,
) -> Option<OperationType> {
    let document = parse_document_source(document, &schema.schema).ok()?;

    let operations: Vec<_> = document
        .iter()
        .filter_map(|definition| match definition {
            Definition::Operation(operation) => Some(&operation.item),
            Definition::Fragment(_) => None,
        })
        .collect();

    let selected = match operation_name {
        Some(operation_name) => operations
            .into_iter()
            .find(|operation| name_of(operation) == Some(operation_name)),
        None if operations.len() == 1 => operations.into_iter().next(),
        None => None,
    };

    selected.map(|operation| operation.operation_type.clone())
}

fn name_of<'a, S: ScalarValue>(operation: &Operation<'a, S>) -> Option<&'a str> {
    operation.name.as_ref().map(|name| name.item)
}
