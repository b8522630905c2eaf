//! Shallow schema checks over JSON values
//!
//! This is deliberately a micro-validator: an optional top-level type, plus
//! one level of required properties with per-property type and inclusive
//! numeric bounds. It is not a JSON-Schema implementation.

use crate::path_query::value_kind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Declarative shape description for a response body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SchemaDescriptor {
    /// Expected primitive type name of the value itself
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Required properties; every declared property must be present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
}

/// Constraints on a single declared property.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Inclusive lower bound; zero is a real bound, not "unset"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

/// Validate a JSON value against a schema descriptor.
pub fn validate_schema(value: &Value, schema: &SchemaDescriptor) -> bool {
    if let Some(expected_type) = &schema.value_type {
        if value_kind(value) != expected_type.as_str() {
            return false;
        }
    }

    if let Some(properties) = &schema.properties {
        let Value::Object(map) = value else {
            return false;
        };

        for (name, property) in properties {
            // Missing key is always a failure, regardless of nested constraints
            let Some(actual) = map.get(name) else {
                return false;
            };

            if let Some(expected_type) = &property.value_type {
                if value_kind(actual) != expected_type.as_str() {
                    return false;
                }
            }

            if property.minimum.is_some() || property.maximum.is_some() {
                let Some(number) = actual.as_f64() else {
                    return false;
                };

                if let Some(minimum) = property.minimum {
                    if number < minimum {
                        return false;
                    }
                }

                if let Some(maximum) = property.maximum {
                    if number > maximum {
                        return false;
                    }
                }
            }
        }
    }

    true
}
