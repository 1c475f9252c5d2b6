use std::collections::HashMap;

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::ClientError;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(fields)) = data {
                response
                    .as_object_mut()
                    .expect("response is an object")
                    .extend(fields);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a raw payload: pretty JSON in json mode, or the same pretty JSON in
/// text mode when no friendlier rendering exists for the resource.
pub fn output_data(output_format: &OutputFormat, data: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json | OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    collection_name: []
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Inline per-field validation errors, shown before any request is made.
pub fn output_field_errors(
    output_format: &OutputFormat,
    errors: &HashMap<String, String>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": "validation failed",
                    "field_errors": errors
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Validation failed:");
            for (field, message) in errors {
                eprintln!("  {}: {}", field, message);
            }
        }
    }
    Ok(())
}

/// Non-fatal warning, e.g. the over-quota correlation projection.
pub fn output_warning(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "warning": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("⚠ {}", message);
        }
    }
    Ok(())
}

/// Report a failed API call and convert it into a terminal error for the
/// command. A 401 gets the login hint; everything else is surfaced verbatim
/// with no retry.
pub fn report_client_error(
    output_format: &OutputFormat,
    err: ClientError,
) -> anyhow::Error {
    let message = match &err {
        ClientError::Unauthorized(msg) => {
            format!("{} - run `plan auth login <email>` first", msg)
        }
        other => other.to_string(),
    };
    let code = err.status().map(|s| s.to_string());
    let _ = output_error(output_format, &message, code.as_deref());
    anyhow::anyhow!(message)
}
