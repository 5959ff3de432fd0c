//! End-to-end view generation over a small library domain

use schemata_core::prelude::*;
use serde_json::json;

fn library() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .register(Model::new(
            "Author",
            ModelSchema::new()
                .field("name", LogicalType::String)
                .field("bio", ColumnDeclaration::new(LogicalType::String).nullable())
                .field("books", RelationDeclaration::new(RelationKind::OneToMany, "Book").cascade_all()),
        ))
        .unwrap();
    registry
        .register(Model::new(
            "Book",
            ModelSchema::new()
                .field("title", LogicalType::String)
                .field("pages", ColumnDeclaration::new(LogicalType::Integer).default_value(json!(100)))
                .field("createdAt", ColumnDeclaration::new(LogicalType::Date).create_date())
                .field("author", RelationDeclaration::new(RelationKind::ManyToOne, "Author").eager()),
        ))
        .unwrap();
    registry
}

#[test]
fn test_author_create_schema_embeds_books() {
    let registry = library();
    let author = registry.get("Author").unwrap();

    let schema = author.create_schema(&registry, None).unwrap().to_value().unwrap();
    assert_eq!(
        schema,
        json!({
            "$id": "Author_createSchema",
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "bio": {"type": "string"},
                "books": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "pages": {"type": "integer"}
                        },
                        "required": ["title"]
                    }
                }
            },
            "required": ["name"]
        })
    );
}

#[test]
fn test_book_full_schema_embeds_eager_author() {
    let registry = library();
    let book = registry.get("Book").unwrap();

    let schema = book.full_schema(&registry, Some("api")).unwrap().to_value().unwrap();
    assert_eq!(schema["$id"], "api_Book_fullSchema");
    assert_eq!(schema["properties"]["id"], json!({"type": "integer"}));
    assert_eq!(schema["properties"]["createdAt"], json!({"type": "string"}));

    let author = &schema["properties"]["author"];
    assert!(author.get("$id").is_none());
    assert_eq!(author["type"], "object");
    // Author's books are not eager
    assert!(author["properties"].get("books").is_none());
    assert!(schema.get("required").is_none());
}

#[test]
fn test_book_create_schema_skips_non_cascading_author() {
    let registry = library();
    let book = registry.get("Book").unwrap();

    let schema = book.create_schema(&registry, None).unwrap();
    let names: Vec<&str> = schema.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["title", "pages"]);
    assert_eq!(schema.required, Some(vec!["title".to_string()]));
}

#[test]
fn test_cascading_to_one_relation_embeds_target_create_view() {
    let mut registry = ModelRegistry::new();
    // Book references Author before Author exists
    let book = registry
        .register(Model::new(
            "Book",
            ModelSchema::new()
                .field("title", LogicalType::String)
                .field("author", RelationDeclaration::new(RelationKind::ManyToOne, "Author").cascade_all()),
        ))
        .unwrap();
    let author = registry
        .register(Model::new("Author", ModelSchema::new().field("name", LogicalType::String)))
        .unwrap();

    let book_schema = book.create_schema(&registry, None).unwrap();
    let author_schema = author.create_schema(&registry, None).unwrap();

    assert_eq!(
        book_schema.property("author"),
        Some(&PropertySchema::embedded(author_schema.clone().without_id()))
    );

    let value = book_schema.to_value().unwrap();
    assert_eq!(value["properties"]["author"], author_schema.without_id().to_value().unwrap());
    assert_eq!(value["properties"]["author"]["type"], "object");
    assert_eq!(value["required"], json!(["title"]));
}

#[test]
fn test_cascade_operations_select_relations_per_view() {
    let mut registry = ModelRegistry::new();
    registry.register(Model::new("Tag", ModelSchema::new().field("label", LogicalType::String))).unwrap();
    let post = registry
        .register(Model::new(
            "Post",
            ModelSchema::new()
                .field("title", LogicalType::String)
                .field(
                    "insertOnly",
                    RelationDeclaration::new(RelationKind::ManyToMany, "Tag")
                        .cascade_on(vec![CascadeOperation::Insert]),
                )
                .field(
                    "updateOnly",
                    RelationDeclaration::new(RelationKind::OneToOne, "Tag")
                        .cascade_on(vec![CascadeOperation::Update]),
                )
                .field(
                    "removeOnly",
                    RelationDeclaration::new(RelationKind::OneToOne, "Tag")
                        .cascade_on(vec![CascadeOperation::Remove]),
                )
                .field("everything", RelationDeclaration::new(RelationKind::OneToOne, "Tag").cascade_all()),
        ))
        .unwrap();

    let create = post.create_schema(&registry, None).unwrap();
    let names: Vec<&str> = create.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["title", "insertOnly", "everything"]);
    assert!(matches!(create.property("insertOnly"), Some(PropertySchema::Array(_))));

    let update = post.update_schema(&registry, None).unwrap();
    let names: Vec<&str> = update.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["title", "updateOnly", "everything"]);

    let full = post.full_schema(&registry, None).unwrap();
    let names: Vec<&str> = full.properties.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["id", "title"]);
}

#[test]
fn test_unknown_relation_target_fails_at_generation() {
    let mut registry = ModelRegistry::new();
    let order = registry
        .register(Model::new(
            "Order",
            ModelSchema::new().field("customer", RelationDeclaration::new(RelationKind::ManyToOne, "Customer").eager()),
        ))
        .unwrap();

    // normalization alone succeeds, the target is only resolved for views
    assert!(order.definition().is_ok());
    assert_eq!(
        order.full_schema(&registry, None).unwrap_err(),
        SchemaError::UnknownModelReference("Customer".to_string())
    );
}

#[test]
fn test_invalid_declarations_surface_from_views() {
    let mut registry = ModelRegistry::new();
    let model = registry
        .register(Model::new(
            "Account",
            ModelSchema::new().field("code", ColumnDeclaration::new(LogicalType::String).primary()),
        ))
        .unwrap();

    let err = model.create_schema(&registry, None).unwrap_err();
    assert!(matches!(err, SchemaError::MultiplePrimaryKeys { .. }));
    assert!(err.example().is_some());
}

#[test]
fn test_form_views_for_document_model() {
    let mut registry = ModelRegistry::new();
    let doc = registry
        .register(Model::new(
            "Doc",
            ModelSchema::new().field("title", LogicalType::String).field("attachment", LogicalType::File),
        ))
        .unwrap();

    let form = doc.form_create_schema(&registry, None).unwrap().to_value().unwrap();
    assert_eq!(
        form,
        json!({
            "$id": "Doc_formCreateSchema",
            "type": "object",
            "properties": {
                "title": {"type": "string"},
                "attachment": {"type": "object", "customSwaggerProps": {"type": "file"}}
            },
            "required": ["title", "attachment"]
        })
    );

    let form = doc.form_update_schema(&registry, Some("admin")).unwrap();
    assert_eq!(form.id.as_deref(), Some("admin_Doc_formUpdateSchema"));
    assert!(form.required.is_none());
}

#[test]
fn test_error_response_schema_shape() {
    assert_eq!(
        error_response_schema().to_value().unwrap(),
        json!({
            "$id": "ErrorResponse",
            "type": "object",
            "properties": {
                "statusCode": {"type": "number"},
                "error": {"type": "string"},
                "message": {"type": "string"}
            }
        })
    );
}

#[test]
fn test_form_rewrite_stays_at_top_level() {
    let mut registry = ModelRegistry::new();
    let folder = registry
        .register(Model::new(
            "Folder",
            ModelSchema::new()
                .field("cover", LogicalType::File)
                .field("docs", RelationDeclaration::new(RelationKind::OneToMany, "Doc").cascade_all()),
        ))
        .unwrap();
    registry.register(Model::new("Doc", ModelSchema::new().field("att", LogicalType::File))).unwrap();

    for form in [
        folder.form_create_schema(&registry, None).unwrap(),
        folder.form_update_schema(&registry, None).unwrap(),
    ] {
        let form = form.to_value().unwrap();
        assert_eq!(
            form["properties"]["cover"],
            json!({"type": "object", "customSwaggerProps": {"type": "file"}})
        );
        assert_eq!(form["properties"]["docs"]["type"], "array");
        assert_eq!(
            form["properties"]["docs"]["items"]["properties"]["att"],
            json!({"type": "object", "additionalProperties": true})
        );
    }
}
