//! Human-readable rendering of data source schemas

use eksa_core::schema::{AttributeSchema, AttributeType, DataSourceSchema};

/// Render the attribute tree of a data source, one attribute per line
pub fn format_schema(schema: &DataSourceSchema) -> String {
    let mut out = String::new();
    out.push_str(&schema.type_name);
    out.push('\n');
    if let Some(description) = &schema.description {
        out.push_str(&format!("  {}\n", description));
    }
    for attribute in &schema.attributes {
        format_attribute(attribute, 1, &mut out);
    }
    out
}

fn format_attribute(attribute: &AttributeSchema, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let mut line = format!(
        "{}{}: {} -> {}",
        indent,
        attribute.name,
        attribute.attr_type,
        attribute.wire_name()
    );

    let mut flags = Vec::new();
    if attribute.required {
        flags.push("required".to_string());
    }
    if attribute.computed {
        flags.push("computed".to_string());
    }
    flags.extend(attribute.validators.iter().map(|v| v.describe()));
    if !flags.is_empty() {
        line.push_str(&format!(" ({})", flags.join(", ")));
    }
    out.push_str(&line);
    out.push('\n');

    if let AttributeType::Enum(values) = &attribute.attr_type {
        out.push_str(&format!("{}  one of: {}\n", indent, values.join(", ")));
    }
    if let Some(nested) = attribute.attr_type.nested_attributes() {
        for child in nested {
            format_attribute(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eksa_core::schema::Validator;

    #[test]
    fn formats_nested_tree() {
        let schema = DataSourceSchema::new("k8s_example_manifest")
            .with_description("Example")
            .attribute(AttributeSchema::new("yaml", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new(
                    "spec",
                    AttributeType::Object(vec![
                        AttributeSchema::new("node_count", AttributeType::Int)
                            .required()
                            .with_validator(Validator::IntAtLeast(1)),
                        AttributeSchema::new("mode", AttributeType::enumeration(&["a", "b"])),
                    ]),
                )
                .required(),
            );

        let text = format_schema(&schema);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "k8s_example_manifest");
        assert_eq!(lines[1], "  Example");
        assert!(lines[2].starts_with("  yaml: String -> yaml (computed)"));
        assert!(lines[3].starts_with("  spec: "));
        assert!(lines[3].ends_with("(required)"));
        assert_eq!(lines[4], "    node_count: Int -> nodeCount (required, >= 1)");
        assert!(lines[5].starts_with("    mode: "));
        assert_eq!(lines[6], "      one of: a, b");
    }
}
