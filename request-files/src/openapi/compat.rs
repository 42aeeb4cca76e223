//! Legacy OpenAPI 3.0 document served at the schema URL.
//!
//! The document is generated from [`ROUTES`], the table of operational routes, using the naming
//! rules clients of the original service depend on:
//!
//! - `operationId`: handler name followed by the path, with every non-word character replaced by
//!   `_`, then `_` and the lowercase method (`create_files` + `/files/` + POST becomes
//!   `create_files_files__post`)
//! - `summary`: the handler name in title case (`create_upload_files` becomes `Create Upload Files`)
//! - request bodies are registered as `Body_<handler name>` component schemas
//!
//! All maps are ordered, so the rendered bytes are identical across calls and restarts.

use serde::Serialize;
use std::collections::BTreeMap;

pub const OPENAPI_VERSION: &str = "3.0.2";

const JSON: &str = "application/json";
const HTTP_VALIDATION_ERROR: &str = "HTTPValidationError";
const VALIDATION_ERROR: &str = "ValidationError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_lowercase(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

/// Shape of a single body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Repeated binary part (`type: array` of `string`/`binary`)
    BinaryList,
}

#[derive(Debug, Clone, Copy)]
pub struct BodyField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct BodyDoc {
    pub media_type: &'static str,
    pub fields: &'static [BodyField],
}

/// Documentation entry for one operational route.
#[derive(Debug, Clone, Copy)]
pub struct RouteDoc {
    /// Endpoint name, drives `operationId`, `summary` and the body schema name
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    pub body: Option<BodyDoc>,
}

const UPLOAD_BODY: BodyDoc = BodyDoc {
    media_type: "multipart/form-data",
    fields: &[BodyField {
        name: "files",
        kind: FieldKind::BinaryList,
        required: true,
    }],
};

/// Every route that appears in the schema document.
pub const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        name: "create_files",
        path: "/files/",
        method: HttpMethod::Post,
        body: Some(UPLOAD_BODY),
    },
    RouteDoc {
        name: "create_upload_files",
        path: "/uploadfiles/",
        method: HttpMethod::Post,
        body: Some(UPLOAD_BODY),
    },
    RouteDoc {
        name: "main",
        path: "/",
        method: HttpMethod::Get,
        body: None,
    },
];

/// Whether `path` is served by one of the [`ROUTES`].
pub fn is_known_path(path: &str) -> bool {
    ROUTES.iter().any(|route| route.path == path)
}

// ============================================================================
// Document model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyOpenApi {
    pub openapi: String,
    pub info: Info,
    pub paths: BTreeMap<String, PathItem>,
    #[serde(skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub responses: BTreeMap<String, Response>,
    pub summary: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Schema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub content: BTreeMap<String, MediaType>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    pub schemas: BTreeMap<String, Schema>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Subset of JSON schema used by the document. An empty schema serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn reference(component: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{component}")),
            ..Self::default()
        }
    }

    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array")
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn for_field(kind: FieldKind) -> Self {
        match kind {
            FieldKind::BinaryList => Self::array_of(Self {
                format: Some("binary".to_string()),
                ..Self::typed("string")
            }),
        }
    }
}

// ============================================================================
// Naming rules
// ============================================================================

/// `operationId` for a route: `<name><path>` with non-word characters mapped to `_`,
/// suffixed with `_<method>`.
pub fn operation_id(name: &str, path: &str, method: HttpMethod) -> String {
    let base: String = format!("{name}{path}")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{base}_{}", method.as_lowercase())
}

/// Title case of an underscore separated identifier: `create_upload_files` -> `Create Upload Files`.
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn body_schema_name(name: &str) -> String {
    format!("Body_{name}")
}

// ============================================================================
// Rendering
// ============================================================================

fn json_content(schema: Schema) -> BTreeMap<String, MediaType> {
    BTreeMap::from([(JSON.to_string(), MediaType { schema })])
}

fn body_schema(name: &str, body: &BodyDoc) -> Schema {
    let properties = body
        .fields
        .iter()
        .map(|field| (field.name.to_string(), Schema::for_field(field.kind).titled(title_case(field.name))))
        .collect();

    Schema {
        title: Some(name.to_string()),
        required: body.fields.iter().filter(|f| f.required).map(|f| f.name.to_string()).collect(),
        properties,
        ..Schema::typed("object")
    }
}

fn validation_error_schemas() -> [(String, Schema); 2] {
    let validation_error = Schema {
        title: Some(VALIDATION_ERROR.to_string()),
        required: vec!["loc".to_string(), "msg".to_string(), "type".to_string()],
        properties: BTreeMap::from([
            ("loc".to_string(), Schema::array_of(Schema::typed("string")).titled("Location")),
            ("msg".to_string(), Schema::typed("string").titled("Message")),
            ("type".to_string(), Schema::typed("string").titled("Error Type")),
        ]),
        ..Schema::typed("object")
    };

    let http_validation_error = Schema {
        title: Some(HTTP_VALIDATION_ERROR.to_string()),
        properties: BTreeMap::from([(
            "detail".to_string(),
            Schema::array_of(Schema::reference(VALIDATION_ERROR)).titled("Detail"),
        )]),
        ..Schema::typed("object")
    };

    [
        (VALIDATION_ERROR.to_string(), validation_error),
        (HTTP_VALIDATION_ERROR.to_string(), http_validation_error),
    ]
}

fn operation(route: &RouteDoc, schemas: &mut BTreeMap<String, Schema>) -> Operation {
    let mut responses = BTreeMap::from([(
        "200".to_string(),
        Response {
            description: "Successful Response".to_string(),
            content: json_content(Schema::default()),
        },
    )]);

    let request_body = route.body.as_ref().map(|body| {
        let schema_name = body_schema_name(route.name);
        schemas.insert(schema_name.clone(), body_schema(&schema_name, body));
        schemas.extend(validation_error_schemas());

        responses.insert(
            "422".to_string(),
            Response {
                description: "Validation Error".to_string(),
                content: json_content(Schema::reference(HTTP_VALIDATION_ERROR)),
            },
        );

        RequestBody {
            content: BTreeMap::from([(body.media_type.to_string(), MediaType { schema: Schema::reference(&schema_name) })]),
            required: body.fields.iter().any(|f| f.required),
        }
    });

    Operation {
        responses,
        summary: title_case(route.name),
        operation_id: operation_id(route.name, route.path, route.method),
        request_body,
    }
}

/// Build the document for `routes`.
pub fn render(title: &str, version: &str, routes: &[RouteDoc]) -> LegacyOpenApi {
    let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
    let mut schemas = BTreeMap::new();

    for route in routes {
        let op = operation(route, &mut schemas);
        let item = paths.entry(route.path.to_string()).or_default();
        match route.method {
            HttpMethod::Get => item.get = Some(op),
            HttpMethod::Post => item.post = Some(op),
        }
    }

    LegacyOpenApi {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: title.to_string(),
            version: version.to_string(),
        },
        paths,
        components: Components { schemas },
    }
}

/// Render the document to the exact bytes served over HTTP.
pub fn render_json(title: &str, version: &str, routes: &[RouteDoc]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&render(title, version, routes))
}
