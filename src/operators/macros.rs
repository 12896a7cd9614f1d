/// Implement the Operator trait from a name, a kind and two bodies.
///
/// Usage:
/// ```ignore
/// impl_operator! {
///     RenameColumns,
///     name: "rename-columns",
///     kind: "transformer",
///     output_schema: |self, schema| { self.rename_schema(schema) },
///     apply: |self, batch| { self.rename_batch(batch) }
/// }
/// ```
macro_rules! impl_operator {
    (
        $struct_name:ty,
        name: $name:expr,
        kind: $kind:expr,
        output_schema: |$s_self:ident, $schema:ident| $schema_body:block,
        apply: |$self:ident, $batch:ident| $apply_body:block
    ) => {
        impl $crate::operators::Operator for $struct_name {
            fn name(&self) -> &str {
                $name
            }

            fn kind(&self) -> &str {
                $kind
            }

            fn output_schema(
                &$s_self,
                $schema: &arrow::datatypes::Schema,
            ) -> $crate::error::Result<arrow::datatypes::SchemaRef> {
                $schema_body
            }

            fn apply(
                &$self,
                $batch: arrow::record_batch::RecordBatch,
            ) -> $crate::error::Result<arrow::record_batch::RecordBatch> {
                $apply_body
            }
        }
    };
}
