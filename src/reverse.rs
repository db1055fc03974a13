//! Reverse translation: IDS document → bSDD import JSON.
//!
//! Each specification becomes one class record. Properties without a shared
//! bSDD URI are synthesized into a document-level property list that is
//! deduplicated by code across the whole run; the first definition wins.
//!
//! Classification recovery only understands the fixed NL-SfB pattern scheme,
//! so forward and reverse are not true inverses for classification facets.

use crate::bsdd::types::{
    BsddImport, ImportAllowedValue, ImportClass, ImportClassProperty, ImportProperty,
    ImportRelation,
};
use crate::datatype::map_reverse;
use crate::ids::{Facet, FacetValue, Ids, Specification};
use crate::naming::code_from_name;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::debug;

/// URI prefix of shared, bSDD-owned definitions.
const BSDD_IDENTIFIER_PREFIX: &str = "https://identifier.buildingsmart.org/uri/";

/// Base path classification codes are resolved against when recovering
/// relations from pattern restrictions.
const NLSFB_CLASS_BASE: &str =
    "https://identifier.buildingsmart.org/uri/nlsfb/nlsfb2005/2.2/class/";

/// Options for assembling the import document header.
pub struct ReverseOptions {
    pub organization_code: String,
    pub change_request_email: Option<String>,
}

/// Translate an IDS document into a bSDD import document.
pub fn translate_ids(ids: &Ids, options: &ReverseOptions) -> BsddImport {
    let mut registry = PropertyRegistry::new();

    let classes: Vec<ImportClass> = ids
        .specifications
        .iter()
        .map(|specification| class_from_specification(specification, &mut registry))
        .collect();

    BsddImport {
        model_version: "2.0".to_string(),
        organization_code: options.organization_code.clone(),
        dictionary_code: code_from_name(&ids.title),
        dictionary_name: ids.title.clone(),
        dictionary_version: "0.1".to_string(),
        language_iso_code: "nl-NL".to_string(),
        use_own_uri: None,
        dictionary_uri: None,
        license: None,
        license_url: None,
        change_request_email_address: options.change_request_email.clone(),
        more_info_url: None,
        quality_assurance_procedure: None,
        quality_assurance_procedure_url: None,
        release_date: ids.date.as_deref().and_then(utc_release_date),
        status: "Preview".to_string(),
        classes,
        properties: registry.into_properties(),
    }
}

/// Shared property definitions deduplicated by code; first writer wins.
struct PropertyRegistry {
    codes: HashSet<String>,
    properties: Vec<ImportProperty>,
}

impl PropertyRegistry {
    fn new() -> Self {
        Self {
            codes: HashSet::new(),
            properties: Vec::new(),
        }
    }

    fn register(&mut self, property: ImportProperty) {
        if self.codes.insert(property.code.clone()) {
            self.properties.push(property);
        } else {
            debug!(code = %property.code, "ignoring duplicate property definition");
        }
    }

    fn into_properties(self) -> Vec<ImportProperty> {
        self.properties
    }
}

fn class_from_specification(
    specification: &Specification,
    registry: &mut PropertyRegistry,
) -> ImportClass {
    // Applicability wins over requirements for entity recovery
    let related_entities = {
        let from_applicability = entity_names(&specification.applicability);
        if from_applicability.is_empty() {
            entity_names(&specification.requirements)
        } else {
            from_applicability
        }
    };

    let mut class_properties = properties_from_facets(&specification.applicability, registry);
    class_properties.extend(properties_from_facets(&specification.requirements, registry));

    let mut relations = class_relations(&specification.applicability);
    relations.extend(class_relations(&specification.requirements));

    ImportClass {
        class_type: "Class".to_string(),
        name: specification.name.clone(),
        code: code_from_name(&specification.name),
        definition: specification
            .description
            .clone()
            .filter(|description| !description.is_empty()),
        related_ifc_entity_names_list: related_entities,
        class_properties,
        class_relations: relations,
    }
}

/// Recover at most one combined entity code from a facet set: the first
/// entity facet's name and predefined type concatenated, `.` stripped.
fn entity_names(facets: &[Facet]) -> Vec<String> {
    for facet in facets {
        if let Facet::Entity {
            name,
            predefined_type,
        } = facet
        {
            let mut combined = String::new();
            if let Some(name) = name.simple() {
                combined.push_str(name);
            }
            if let Some(predefined) = predefined_type.as_ref().and_then(FacetValue::simple) {
                combined.push_str(predefined);
            }
            let combined = combined.replace('.', "");
            if combined.is_empty() {
                return Vec::new();
            }
            return vec![combined];
        }
    }
    Vec::new()
}

fn properties_from_facets(
    facets: &[Facet],
    registry: &mut PropertyRegistry,
) -> Vec<ImportClassProperty> {
    facets
        .iter()
        .filter_map(|facet| match facet {
            Facet::Property {
                property_set,
                base_name,
                value,
                data_type,
                uri,
                cardinality,
                instructions,
            } => class_property(
                property_set,
                base_name,
                value.as_ref(),
                data_type.as_deref(),
                uri.as_deref(),
                cardinality.as_deref(),
                instructions.as_deref(),
                registry,
            ),
            _ => None,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn class_property(
    property_set: &FacetValue,
    base_name: &FacetValue,
    value: Option<&FacetValue>,
    data_type: Option<&str>,
    uri: Option<&str>,
    cardinality: Option<&str>,
    instructions: Option<&str>,
    registry: &mut PropertyRegistry,
) -> Option<ImportClassProperty> {
    // Restriction-valued names/sets have no bSDD counterpart
    let base_name = base_name.simple()?;
    let property_set = property_set.simple()?;

    let mapped_data_type = map_reverse(data_type.unwrap_or_default());
    let code = code_from_name(base_name);
    let description = instructions
        .map(str::to_string)
        .filter(|instructions| !instructions.is_empty());

    let (property_uri, owned_uri) = match uri {
        Some(uri) if uri.starts_with(BSDD_IDENTIFIER_PREFIX) => (Some(uri.to_string()), None),
        Some(uri) => (None, Some(uri.to_string())),
        None => (None, None),
    };

    // Without a shared URI the property is defined by this document: register
    // it once, keyed by code.
    let property_code = if property_uri.is_none() {
        registry.register(ImportProperty {
            code: code.clone(),
            name: base_name.to_string(),
            definition: description.clone(),
            data_type: mapped_data_type.to_string(),
            owned_uri: owned_uri.clone(),
        });
        Some(code.clone())
    } else {
        None
    };

    let allowed_values = value
        .and_then(FacetValue::enumeration)
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(index, value)| ImportAllowedValue {
                    code: code_from_name(value),
                    value: value.clone(),
                    sort_number: index,
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ImportClassProperty {
        code,
        description,
        is_required: cardinality == Some("required"),
        property_set: property_set.to_string(),
        owned_uri,
        property_uri,
        property_code,
        allowed_values,
    })
}

/// Recover `IsChildOf` relations from pattern-valued classification facets.
fn class_relations(facets: &[Facet]) -> Vec<ImportRelation> {
    let mut relations = Vec::new();
    for facet in facets {
        let Facet::Classification {
            value: Some(value), ..
        } = facet
        else {
            continue;
        };
        let Some(patterns) = value.patterns() else {
            continue;
        };
        for pattern in patterns {
            let class_code = pattern.replace(".*", "");
            relations.push(ImportRelation {
                relation_type: "IsChildOf".to_string(),
                related_class_uri: format!("{}{}", NLSFB_CLASS_BASE, class_code),
            });
        }
    }
    relations
}

/// Convert an IDS info date to a UTC release timestamp.
fn utc_release_date(date: &str) -> Option<String> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(format!("{}Z", datetime.format("%Y-%m-%dT%H:%M:%S")));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|date| format!("{}T00:00:00Z", date.format("%Y-%m-%d")))
}
