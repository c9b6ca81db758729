//! Schema introspection for developer inspection.

use serde::Deserialize;

/// Root operation types with their fields, descriptions and argument types.
///
/// Type references nest four levels so list-of-non-null shapes such as
/// `[Book!]!` resolve down to the named type.
pub const INTROSPECTION_QUERY: &str = "query IntrospectionQuery {
  __schema {
    queryType { ...RootType }
    mutationType { ...RootType }
  }
}

fragment RootType on __Type {
  name
  fields {
    name
    description
    args {
      name
      description
      type { ...TypeRef }
    }
    type { ...TypeRef }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
      }
    }
  }
}";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaData {
    #[serde(rename = "__schema")]
    pub schema: SchemaInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInfo {
    pub query_type: RootType,
    #[serde(default)]
    pub mutation_type: Option<RootType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RootType {
    pub name: String,
    #[serde(default)]
    pub fields: Option<Vec<FieldInfo>>,
}

impl RootType {
    pub fn fields(&self) -> &[FieldInfo] {
        self.fields.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<ArgInfo>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl FieldInfo {
    /// `name(arg: Type, ...): ReturnType`
    pub fn signature(&self) -> String {
        if self.args.is_empty() {
            return format!("{}: {}", self.name, format_type(&self.ty));
        }
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| format!("{}: {}", a.name, format_type(&a.ty)))
            .collect();
        format!(
            "{}({}): {}",
            self.name,
            args.join(", "),
            format_type(&self.ty)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArgInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeRef {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ofType", default)]
    pub of_type: Option<Box<TypeRef>>,
}

/// Render a type reference in SDL notation (`Book`, `[Book!]!`, ...).
pub fn format_type(ty: &TypeRef) -> String {
    if let Some(name) = &ty.name {
        return name.clone();
    }
    match (ty.kind.as_str(), ty.of_type.as_deref()) {
        ("LIST", Some(inner)) => format!("[{}]", format_type(inner)),
        ("NON_NULL", Some(inner)) => format!("{}!", format_type(inner)),
        // Nesting deeper than the query asked for.
        (kind, _) => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(kind: &str, name: &str) -> TypeRef {
        TypeRef {
            kind: kind.to_string(),
            name: Some(name.to_string()),
            of_type: None,
        }
    }

    fn wrap(kind: &str, inner: TypeRef) -> TypeRef {
        TypeRef {
            kind: kind.to_string(),
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    #[test]
    fn test_format_named() {
        assert_eq!(format_type(&named("SCALAR", "String")), "String");
    }

    #[test]
    fn test_format_list_of_non_null() {
        let ty = wrap(
            "NON_NULL",
            wrap("LIST", wrap("NON_NULL", named("OBJECT", "Book"))),
        );
        assert_eq!(format_type(&ty), "[Book!]!");
    }

    #[test]
    fn test_format_truncated_reference_falls_back_to_kind() {
        let truncated = TypeRef {
            kind: "NON_NULL".to_string(),
            name: None,
            of_type: None,
        };
        let ty = wrap("NON_NULL", wrap("LIST", truncated));
        assert_eq!(format_type(&ty), "[NON_NULL]!");
    }

    #[test]
    fn test_decode_and_signature() {
        let non_null_string = json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": { "kind": "SCALAR", "name": "String", "ofType": null }
        });
        let data: SchemaData = serde_json::from_value(json!({
            "__schema": {
                "queryType": { "name": "Query", "fields": [] },
                "mutationType": {
                    "name": "Mutation",
                    "fields": [{
                        "name": "createBook",
                        "description": "Add a book.",
                        "args": [
                            {
                                "name": "title",
                                "description": null,
                                "type": non_null_string.clone()
                            },
                            { "name": "author", "description": null, "type": non_null_string }
                        ],
                        "type": { "kind": "NON_NULL", "name": null,
                                  "ofType": { "kind": "OBJECT", "name": "Book", "ofType": null } }
                    }]
                }
            }
        }))
        .unwrap();

        assert!(data.schema.query_type.fields().is_empty());
        let mutation = data.schema.mutation_type.unwrap();
        assert_eq!(
            mutation.fields()[0].signature(),
            "createBook(title: String!, author: String!): Book!"
        );
    }
}
