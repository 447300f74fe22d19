// src/mcp/schemas.rs
//! Tool definitions: names, descriptions and JSON input schemas.

use crate::enrich::ExportFormat;
use crate::operations::WRITE_OPERATIONS;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Definition of a tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn tool(name: &'static str, description: &str, input_schema: Value) -> ToolDefinition {
    let description = if WRITE_OPERATIONS.contains(&name) {
        format!("{} Requires BOOKSTACK_ENABLE_WRITE=true.", description)
    } else {
        description.to_string()
    };
    ToolDefinition {
        name,
        description,
        input_schema,
    }
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(extra)) = (base.as_object_mut(), extra) {
        target.extend(extra);
    }
    base
}

fn id_property(entity: &str) -> Value {
    json!({ "id": { "type": "integer", "description": format!("Id of the {}", entity) } })
}

fn list_properties() -> Value {
    json!({
        "offset": { "type": "integer", "minimum": 0, "description": "Number of items to skip" },
        "count": {
            "type": "integer", "minimum": 1, "maximum": 500,
            "description": "Items to return (default 20, max 500)"
        },
        "sort": { "type": "string", "description": "Sort field, prefix '-' for descending, e.g. '-updated_at'" },
        "filter": {
            "type": "object",
            "additionalProperties": { "type": "string" },
            "description": "Filters as field or field:operation keys, e.g. {\"name:like\": \"%guide%\"}"
        }
    })
}

fn tags_property() -> Value {
    json!({
        "tags": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": { "name": { "type": "string" }, "value": { "type": "string" } },
                "required": ["name"]
            }
        }
    })
}

fn described_properties() -> Value {
    merge(
        json!({
            "name": { "type": "string" },
            "description": { "type": "string", "description": "Plain-text description" },
            "description_html": { "type": "string", "description": "HTML description" }
        }),
        tags_property(),
    )
}

fn page_properties() -> Value {
    merge(
        json!({
            "book_id": { "type": "integer", "description": "Parent book (or give chapter_id)" },
            "chapter_id": { "type": "integer", "description": "Parent chapter" },
            "name": { "type": "string" },
            "html": { "type": "string", "description": "Page body as HTML" },
            "markdown": { "type": "string", "description": "Page body as Markdown" },
            "priority": { "type": "integer" }
        }),
        tags_property(),
    )
}

fn chapter_properties() -> Value {
    merge(
        json!({
            "book_id": { "type": "integer" },
            "priority": { "type": "integer" }
        }),
        described_properties(),
    )
}

fn shelf_properties() -> Value {
    merge(
        json!({
            "books": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "Book ids in display order; replaces the current list"
            }
        }),
        described_properties(),
    )
}

fn attachment_properties() -> Value {
    json!({
        "name": { "type": "string" },
        "uploaded_to": { "type": "integer", "description": "Id of the owning page" },
        "link": { "type": "string", "description": "External URL" }
    })
}

fn export_schema(entity: &str) -> Value {
    let formats: Vec<&str> = ExportFormat::ALL.iter().map(ExportFormat::as_str).collect();
    object(
        merge(
            id_property(entity),
            json!({ "format": { "type": "string", "enum": formats } }),
        ),
        &["id", "format"],
    )
}

fn search_properties() -> Value {
    json!({
        "query": {
            "type": "string",
            "description": "Search terms; BookStack syntax such as {type:page} or [tag=value] is supported"
        },
        "page": { "type": "integer", "minimum": 1 },
        "count": { "type": "integer", "minimum": 1, "maximum": 100 }
    })
}

/// Every tool, read tools first.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // --- Read ---
        tool(
            "get_capabilities",
            "Describe this server: instance URL, whether writes are enabled, available operations and export formats.",
            object(json!({}), &[]),
        ),
        tool(
            "search_content",
            "Search books, chapters, pages and shelves. Results include direct links and previews.",
            object(search_properties(), &["query"]),
        ),
        tool(
            "search_pages",
            "Search pages only, optionally limited to one book.",
            object(
                merge(search_properties(), json!({ "book_id": { "type": "integer" } })),
                &["query"],
            ),
        ),
        tool("get_books", "List books.", object(list_properties(), &[])),
        tool(
            "get_book",
            "Get a book with its chapters and pages.",
            object(id_property("book"), &["id"]),
        ),
        tool(
            "get_pages",
            "List pages. Filter by book with {\"book_id\": \"3\"}.",
            object(list_properties(), &[]),
        ),
        tool(
            "get_page",
            "Get a page with its full content, word count and location.",
            object(id_property("page"), &["id"]),
        ),
        tool("get_chapters", "List chapters.", object(list_properties(), &[])),
        tool(
            "get_chapter",
            "Get a chapter with its pages.",
            object(id_property("chapter"), &["id"]),
        ),
        tool("get_shelves", "List shelves.", object(list_properties(), &[])),
        tool(
            "get_shelf",
            "Get a shelf with its books.",
            object(id_property("shelf"), &["id"]),
        ),
        tool(
            "get_attachments",
            "List attachments. Filter by page with {\"uploaded_to\": \"12\"}.",
            object(list_properties(), &[]),
        ),
        tool(
            "get_attachment",
            "Get an attachment. For links the content is the target URL.",
            object(id_property("attachment"), &["id"]),
        ),
        tool(
            "export_book",
            "Export a book. Text formats return the content; pdf and zip return a download link.",
            export_schema("book"),
        ),
        tool(
            "export_chapter",
            "Export a chapter. Text formats return the content; pdf and zip return a download link.",
            export_schema("chapter"),
        ),
        tool(
            "export_page",
            "Export a page. Text formats return the content; pdf and zip return a download link.",
            export_schema("page"),
        ),
        tool(
            "get_recent_changes",
            "Recently updated pages, books and chapters, newest first.",
            object(
                json!({
                    "type": { "type": "string", "enum": ["all", "pages", "books", "chapters"] },
                    "limit": { "type": "integer", "minimum": 1, "maximum": 500 },
                    "days": { "type": "integer", "minimum": 1, "description": "Look-back window (default 30)" }
                }),
                &[],
            ),
        ),
        tool(
            "get_comments",
            "List comments, optionally only those on one page.",
            object(
                json!({
                    "page_id": { "type": "integer" },
                    "offset": { "type": "integer", "minimum": 0 },
                    "count": { "type": "integer", "minimum": 1, "maximum": 500 },
                    "sort": { "type": "string" }
                }),
                &[],
            ),
        ),
        tool(
            "get_comment",
            "Get a comment.",
            object(id_property("comment"), &["id"]),
        ),
        tool("get_users", "List users.", object(list_properties(), &[])),
        tool("get_user", "Get a user.", object(id_property("user"), &["id"])),
        tool(
            "get_audit_log",
            "List audit log entries. Needs an admin token.",
            object(list_properties(), &[]),
        ),
        tool(
            "get_recycle_bin",
            "List deleted items awaiting restore or permanent deletion.",
            object(list_properties(), &[]),
        ),
        // --- Write ---
        tool(
            "create_book",
            "Create a book.",
            object(described_properties(), &["name"]),
        ),
        tool(
            "update_book",
            "Update a book's name, description or tags.",
            object(merge(id_property("book"), described_properties()), &["id"]),
        ),
        tool(
            "delete_book",
            "Move a book to the recycle bin.",
            object(id_property("book"), &["id"]),
        ),
        tool(
            "create_page",
            "Create a page in a book or chapter from HTML or Markdown.",
            object(page_properties(), &["name"]),
        ),
        tool(
            "update_page",
            "Update a page. Setting book_id or chapter_id moves it.",
            object(merge(id_property("page"), page_properties()), &["id"]),
        ),
        tool(
            "delete_page",
            "Move a page to the recycle bin.",
            object(id_property("page"), &["id"]),
        ),
        tool(
            "create_chapter",
            "Create a chapter in a book.",
            object(chapter_properties(), &["book_id", "name"]),
        ),
        tool(
            "update_chapter",
            "Update a chapter. Setting book_id moves it.",
            object(merge(id_property("chapter"), chapter_properties()), &["id"]),
        ),
        tool(
            "delete_chapter",
            "Move a chapter and its pages to the recycle bin.",
            object(id_property("chapter"), &["id"]),
        ),
        tool(
            "create_shelf",
            "Create a shelf.",
            object(shelf_properties(), &["name"]),
        ),
        tool(
            "update_shelf",
            "Update a shelf. A books list replaces the current one.",
            object(merge(id_property("shelf"), shelf_properties()), &["id"]),
        ),
        tool(
            "delete_shelf",
            "Delete a shelf. Its books are kept.",
            object(id_property("shelf"), &["id"]),
        ),
        tool(
            "create_attachment",
            "Attach an external link to a page.",
            object(attachment_properties(), &["name", "uploaded_to", "link"]),
        ),
        tool(
            "upload_attachment",
            "Upload a local file as an attachment of a page.",
            object(
                json!({
                    "page_id": { "type": "integer" },
                    "file_path": { "type": "string", "description": "Path readable by this server" },
                    "name": { "type": "string", "description": "Display name (default: file name)" }
                }),
                &["page_id", "file_path"],
            ),
        ),
        tool(
            "update_attachment",
            "Rename an attachment, change its link or move it to another page.",
            object(merge(id_property("attachment"), attachment_properties()), &["id"]),
        ),
        tool(
            "delete_attachment",
            "Delete an attachment.",
            object(id_property("attachment"), &["id"]),
        ),
        tool(
            "create_comment",
            "Comment on a page, or reply to a comment by its local id.",
            object(
                json!({
                    "page_id": { "type": "integer" },
                    "html": { "type": "string" },
                    "reply_to": { "type": "integer", "description": "local_id of the parent comment" }
                }),
                &["page_id", "html"],
            ),
        ),
        tool(
            "update_comment",
            "Edit a comment or archive it.",
            object(
                merge(
                    id_property("comment"),
                    json!({
                        "html": { "type": "string" },
                        "archived": { "type": "boolean" }
                    }),
                ),
                &["id"],
            ),
        ),
        tool(
            "delete_comment",
            "Delete a comment.",
            object(id_property("comment"), &["id"]),
        ),
        tool(
            "restore_recycle_bin_item",
            "Restore a deleted item from the recycle bin.",
            object(id_property("recycle bin entry"), &["id"]),
        ),
        tool(
            "destroy_recycle_bin_item",
            "Permanently delete a recycle bin entry. This cannot be undone.",
            object(id_property("recycle bin entry"), &["id"]),
        ),
    ]
}

/// Property names declared by a schema, for consistency checks.
pub fn property_names(schema: &Value) -> Vec<String> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(Map::keys)
        .map(|keys| keys.cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::READ_OPERATIONS;

    #[test]
    fn one_definition_per_operation() {
        let names: Vec<&str> = tool_definitions().iter().map(|t| t.name).collect();
        let expected: Vec<&str> = READ_OPERATIONS
            .iter()
            .chain(WRITE_OPERATIONS.iter())
            .copied()
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn required_fields_are_declared() {
        for definition in tool_definitions() {
            let declared = property_names(&definition.input_schema);
            let required = definition.input_schema["required"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            for field in required {
                let field = field.as_str().unwrap().to_string();
                assert!(
                    declared.contains(&field),
                    "{} requires undeclared field {}",
                    definition.name,
                    field
                );
            }
        }
    }

    #[test]
    fn write_tools_mention_the_flag() {
        let definitions = tool_definitions();
        let delete = definitions.iter().find(|t| t.name == "delete_page").unwrap();
        assert!(delete.description.contains("BOOKSTACK_ENABLE_WRITE"));
        let read = definitions.iter().find(|t| t.name == "get_page").unwrap();
        assert!(!read.description.contains("BOOKSTACK_ENABLE_WRITE"));
    }
}
