//! bSDD API response types and the bSDD import-JSON output model.
//!
//! Reference: https://api.bsdd.buildingsmart.org (Dictionary v1 / Class v1)

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// API responses (forward direction input)
// ---------------------------------------------------------------------------

/// Wrapper returned by `GET /api/Dictionary/v1`.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryResponse {
    #[serde(default)]
    pub dictionaries: Vec<Dictionary>,
}

/// One dictionary's metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub organization_code_owner: Option<String>,
}

/// Classes listing returned by `GET /api/Dictionary/v1/Classes`.
///
/// Pagination merges all pages' `classes` into the first page's record, so
/// one value of this type carries the whole listing after fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryClasses {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub organization_name_owner: Option<String>,
    #[serde(default)]
    pub last_updated_utc: Option<String>,
    #[serde(default)]
    pub classes_total_count: usize,
    #[serde(default)]
    pub classes: Vec<ClassListing>,
}

/// One entry of the classes listing; the URI keys the detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListing {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// Full class record returned by `GET /api/Class/v1` with properties and
/// relations included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetails {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub dictionary_uri: Option<String>,
    #[serde(default)]
    pub related_ifc_entity_names: Vec<String>,
    #[serde(default)]
    pub class_properties: Vec<ClassProperty>,
    #[serde(default)]
    pub class_relations: Vec<ClassRelation>,
}

/// A property attached to a class. A property set of `"Attributes"` marks an
/// IFC attribute rather than a property-set property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProperty {
    #[serde(default)]
    pub property_set: Option<String>,
    #[serde(default)]
    pub property_code: Option<String>,
    #[serde(default)]
    pub property_uri: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub predefined_value: Option<String>,
    #[serde(default)]
    pub allowed_values: Vec<AllowedValue>,
}

/// An enumerated allowed value of a class property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowedValue {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub sort_number: Option<i64>,
}

/// A typed edge from one class to another class URI.
///
/// The API has served both casings of these field names over time, hence the
/// aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRelation {
    #[serde(rename = "relationType", alias = "RelationType", default)]
    pub relation_type: String,
    #[serde(rename = "relatedClassUri", alias = "RelatedClassUri", default)]
    pub related_class_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// Import JSON (reverse direction output)
// ---------------------------------------------------------------------------

/// Root of the bSDD import JSON produced by the reverse translation.
///
/// Absent and empty optional fields are skipped during serialization, which
/// is the pruning the import service expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BsddImport {
    pub model_version: String,
    pub organization_code: String,
    pub dictionary_code: String,
    pub dictionary_name: String,
    pub dictionary_version: String,
    pub language_iso_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_own_uri: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_request_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_assurance_procedure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_assurance_procedure_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub status: String,
    pub classes: Vec<ImportClass>,
    pub properties: Vec<ImportProperty>,
}

/// One class record of the import document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportClass {
    pub class_type: String,
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_ifc_entity_names_list: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_properties: Vec<ImportClassProperty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_relations: Vec<ImportRelation>,
}

/// A class property reference in the import document. Either `property_uri`
/// points at a shared bSDD definition, or `property_code` names an entry of
/// the document-level properties list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportClassProperty {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_required: bool,
    pub property_set: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<ImportAllowedValue>,
}

/// One enumerated allowed value, keeping the document's positional order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportAllowedValue {
    pub code: String,
    pub value: String,
    pub sort_number: usize,
}

/// A classification relation recovered from an IDS classification facet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportRelation {
    pub relation_type: String,
    pub related_class_uri: String,
}

/// A shared property definition, deduplicated by code across the whole run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImportProperty {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_uri: Option<String>,
}
