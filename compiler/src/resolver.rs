use pbts_schema::{Field, FieldOptions, FileOptions, RelationOptions, SelectOptions};
use tracing::warn;

use crate::{
    index::CollectionIndex,
    names::{camel_case, pascal_case},
    utils::quote,
};

/// What a field resolution can see: the index of all collections and the
/// generated name of the collection that owns the field.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'i, 'a> {
    pub index:     &'i CollectionIndex<'a>,
    pub type_name: &'i str,
}

/// Maps a field to its TypeScript type expression.
///
/// Select fields also produce an enum declaration, which is appended to
/// `side_definitions`. The caller owns that buffer for the whole run, so
/// enums come out in the order their fields were resolved.
pub fn resolve_field_type(field: &Field, ctx: &FieldContext<'_, '_>, side_definitions: &mut Vec<String>) -> String {
    match &field.options {
        FieldOptions::Text(_)
        | FieldOptions::Email(_)
        | FieldOptions::Autodate(_)
        | FieldOptions::Date(_)
        | FieldOptions::Password(_)
        | FieldOptions::Json(_) => "string".to_string(),
        FieldOptions::Number(_) => "number".to_string(),
        FieldOptions::Bool(_) => "boolean".to_string(),
        FieldOptions::File(options) => file_type(options),
        FieldOptions::Relation(options) => relation_type(field, options, ctx),
        FieldOptions::Select(options) => select_type(field, options, ctx, side_definitions),
    }
}

/// Renders one interface member, e.g. `createdBy: string | undefined;`.
pub fn generate_field_member(field: &Field, ctx: &FieldContext<'_, '_>, side_definitions: &mut Vec<String>) -> String {
    let ty = resolve_field_type(field, ctx, side_definitions);
    format!("{}: {};", camel_case(&field.name), ty)
}

fn file_type(options: &FileOptions) -> String {
    let mut ty = String::from("string");
    if options.max_select > 1 {
        ty.push_str("[]");
    }
    if !options.required {
        ty.push_str(" | undefined");
    }
    ty
}

fn relation_type(field: &Field, options: &RelationOptions, ctx: &FieldContext<'_, '_>) -> String {
    // The reference is only checked; relations are typed by record id.
    if !ctx.index.contains(&options.collection_id) {
        warn!(
            "Relation {}.{} points at unknown collection {}",
            ctx.type_name,
            field.name,
            quote(&options.collection_id)
        );
    }

    if options.required {
        "string".to_string()
    } else {
        "string | undefined".to_string()
    }
}

fn select_type(
    field: &Field,
    options: &SelectOptions,
    ctx: &FieldContext<'_, '_>,
    side_definitions: &mut Vec<String>,
) -> String {
    let enum_name = format!("{}{}", ctx.type_name, pascal_case(&field.name));
    let members: Vec<String> = options
        .values
        .iter()
        .map(|value| format!("{} = {}", pascal_case(value), quote(value)))
        .collect();

    side_definitions.push(format!("export enum {} {{ {} }}", enum_name, members.join(", ")));
    enum_name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbts_schema::{
        AutodateOptions, BoolOptions, Collection, DateOptions, EmailOptions, FieldType, JsonOptions, NumberOptions,
        PasswordOptions, TextOptions, FIELD_TYPES,
    };

    fn sample_field(kind: FieldType) -> Field {
        let options = match kind {
            FieldType::Text     => FieldOptions::Text(TextOptions::default()),
            FieldType::Number   => FieldOptions::Number(NumberOptions::default()),
            FieldType::Password => FieldOptions::Password(PasswordOptions::default()),
            FieldType::Bool     => FieldOptions::Bool(BoolOptions::default()),
            FieldType::Autodate => FieldOptions::Autodate(AutodateOptions::default()),
            FieldType::Email    => FieldOptions::Email(EmailOptions::default()),
            FieldType::File     => FieldOptions::File(FileOptions::default()),
            FieldType::Date     => FieldOptions::Date(DateOptions::default()),
            FieldType::Relation => FieldOptions::Relation(RelationOptions {
                collection_id: "c1".into(),
                ..Default::default()
            }),
            FieldType::Select   => FieldOptions::Select(SelectOptions {
                values: vec!["a".into()],
                ..Default::default()
            }),
            FieldType::Json     => FieldOptions::Json(JsonOptions::default()),
        };
        Field::new("sample", options)
    }

    fn with_context<R>(f: impl FnOnce(&FieldContext<'_, '_>) -> R) -> R {
        let collections = vec![Collection::new("c1", "posts", Vec::new())];
        let index = CollectionIndex::build(&collections);
        let ctx = FieldContext { index: &index, type_name: "Posts" };
        f(&ctx)
    }

    fn resolve(field: &Field) -> (String, Vec<String>) {
        with_context(|ctx| {
            let mut side = Vec::new();
            let ty = resolve_field_type(field, ctx, &mut side);
            (ty, side)
        })
    }

    #[test]
    fn test_every_kind_resolves_to_a_type() {
        for kind in FIELD_TYPES {
            let (ty, _) = resolve(&sample_field(kind));
            assert!(!ty.is_empty(), "empty type for {}", kind);
        }
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(resolve(&sample_field(FieldType::Text)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Email)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Autodate)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Date)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Password)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Json)).0, "string");
        assert_eq!(resolve(&sample_field(FieldType::Number)).0, "number");
        assert_eq!(resolve(&sample_field(FieldType::Bool)).0, "boolean");
    }

    #[test]
    fn test_relation_optionality() {
        let required = Field::new(
            "author",
            FieldOptions::Relation(RelationOptions { collection_id: "c1".into(), required: true, ..Default::default() }),
        );
        let optional = Field::new(
            "author",
            FieldOptions::Relation(RelationOptions { collection_id: "c1".into(), required: false, ..Default::default() }),
        );

        assert_eq!(resolve(&required).0, "string");
        assert_eq!(resolve(&optional).0, "string | undefined");
    }

    #[test]
    fn test_relation_to_unknown_collection_still_resolves() {
        let dangling = Field::new(
            "owner",
            FieldOptions::Relation(RelationOptions { collection_id: "gone".into(), required: true, ..Default::default() }),
        );
        assert_eq!(resolve(&dangling), ("string".to_string(), Vec::new()));
    }

    #[test]
    fn test_file_multiplicity_and_optionality() {
        let file = |max_select, required| {
            Field::new("docs", FieldOptions::File(FileOptions { max_select, required, ..Default::default() }))
        };

        assert_eq!(resolve(&file(3, true)).0, "string[]");
        assert_eq!(resolve(&file(1, true)).0, "string");
        assert_eq!(resolve(&file(3, false)).0, "string[] | undefined");
        assert_eq!(resolve(&file(1, false)).0, "string | undefined");
    }

    #[test]
    fn test_select_emits_one_enum() {
        let status = Field::new(
            "status",
            FieldOptions::Select(SelectOptions { values: vec!["a".into(), "b".into()], ..Default::default() }),
        );
        let (ty, side) = resolve(&status);

        assert_eq!(ty, "PostsStatus");
        assert_eq!(side, vec![r#"export enum PostsStatus { A = "a", B = "b" }"#.to_string()]);
    }

    #[test]
    fn test_select_values_are_normalized_and_quoted() {
        let kind = Field::new(
            "post_kind",
            FieldOptions::Select(SelectOptions {
                values: vec!["long-form".into(), "say \"hi\"".into()],
                ..Default::default()
            }),
        );
        let (ty, side) = resolve(&kind);

        assert_eq!(ty, "PostsPostKind");
        assert_eq!(side[0], r#"export enum PostsPostKind { LongForm = "long-form", Say "hi" = "say \"hi\"" }"#);
    }

    #[test]
    fn test_member_uses_camel_case() {
        let field = Field::new("created_by", FieldOptions::Text(TextOptions::default()));
        let member = with_context(|ctx| generate_field_member(&field, ctx, &mut Vec::new()));
        assert_eq!(member, "createdBy: string;");
    }
}
