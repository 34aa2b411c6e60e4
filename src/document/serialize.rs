//! Renders a capability document in the negotiated wire format.
//!
//! JSON and YAML are structural serializations of the same model. HTML is a
//! swagger-ui shell expanded over the service base URL; the icon links,
//! script tags and the machine-readable self-reference URL inside it are a
//! contract with the browsing client shell and must stay byte-stable apart
//! from the base URL substitution.

use url::form_urlencoded;

use super::model::{CapabilityDocument, ParameterOrRef, SchemaNode};
use crate::error::{AppError, AppResult};
use crate::negotiate::Format;

/// Serialize `document` in `format`. `api_url` is the externally visible URL
/// of the capability endpoint itself, used for the HTML self-reference.
pub fn serialize(
    document: &CapabilityDocument,
    format: Format,
    api_url: &str,
) -> AppResult<(Vec<u8>, &'static str)> {
    validate(document)?;

    let body = match format {
        Format::OpenApiJson => serde_json::to_vec_pretty(document)?,
        Format::Yaml => serde_yaml::to_string(document)?.into_bytes(),
        Format::Html => render_html(document, api_url).into_bytes(),
    };
    Ok((body, format.content_type()))
}

/// Every `$ref` must resolve against the components registry. A dangling
/// reference means the builder broke its own invariant.
fn validate(document: &CapabilityDocument) -> AppResult<()> {
    for (path, item) in &document.paths {
        let Some(operation) = &item.get else { continue };
        for parameter in &operation.parameters {
            match parameter {
                ParameterOrRef::Ref { reference } => {
                    let name = reference
                        .strip_prefix("#/components/parameters/")
                        .ok_or_else(|| dangling(path, reference))?;
                    if !document.components.parameters.contains_key(name) {
                        return Err(dangling(path, reference));
                    }
                }
                ParameterOrRef::Item(param) => {
                    validate_schema(document, path, &param.schema)?;
                }
            }
        }
    }
    for parameter in document.components.parameters.values() {
        validate_schema(document, "components", &parameter.schema)?;
    }
    Ok(())
}

fn validate_schema(
    document: &CapabilityDocument,
    context: &str,
    node: &SchemaNode,
) -> AppResult<()> {
    match node {
        SchemaNode::Ref { reference } => {
            let name = reference
                .strip_prefix("#/components/schemas/")
                .ok_or_else(|| dangling(context, reference))?;
            if !document.components.schemas.contains_key(name) {
                return Err(dangling(context, reference));
            }
            Ok(())
        }
        SchemaNode::Inline(schema) => match &schema.items {
            Some(items) => validate_schema(document, context, items),
            None => Ok(()),
        },
    }
}

fn dangling(context: &str, reference: &str) -> AppError {
    AppError::InvalidDocument(format!("{}: dangling reference {}", context, reference))
}

/// Percent-encoded JSON content type, embedded in the self-reference URL.
fn encoded_json_type() -> String {
    form_urlencoded::byte_serialize(Format::OpenApiJson.content_type().as_bytes()).collect()
}

fn render_html(document: &CapabilityDocument, api_url: &str) -> String {
    let base_url = api_url.strip_suffix("/api").unwrap_or(api_url);
    let title = &document.info.title;
    let spec_url = format!("{}?f={}", api_url, encoded_json_type());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="{base_url}/swagger-ui/swagger-ui.css" />
    <link rel="icon" type="image/png" href="{base_url}/swagger-ui/favicon-32x32.png" sizes="32x32" />
    <link rel="icon" type="image/png" href="{base_url}/swagger-ui/favicon-16x16.png" sizes="16x16" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="{base_url}/swagger-ui/swagger-ui-bundle.js"></script>
    <script src="{base_url}/swagger-ui/swagger-ui-standalone-preset.js"></script>
    <script>
      window.onload = function() {{
        window.ui = SwaggerUIBundle({{
          url: "{spec_url}",
          dom_id: "#swagger-ui",
          deepLinking: true,
          presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
          layout: "StandaloneLayout"
        }});
      }};
    </script>
  </body>
</html>
"##
    )
}
