//! Forward translation: bSDD dictionary → IDS document.
//!
//! Each dictionary class becomes one specification whose applicability pins
//! the class's own classification and whose requirements carry the entity
//! restriction, cross-dictionary classification references, and the class's
//! properties. A class whose detail fetch fails is skipped; the run always
//! produces a document for whatever was retrievable.

use crate::bsdd::{ClassListing, ClassProperty, ClassRelation, ClassSource};
use crate::datatype::map_forward;
use crate::ids::{Facet, FacetValue, Ids, Specification};
use crate::naming::split_entity_code_list;
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// IFC schema version tag stamped on every generated specification.
pub const IFC_VERSION: &str = "IFC4X3_ADD2";

/// Relation types that participate in classification-reference facets;
/// everything else is ignored.
pub const INCLUDED_RELATION_TYPES: &[&str] =
    &["HasMaterial", "IsEqualTo", "IsChildOf", "IsPartOf"];

/// Property-set name bSDD uses to mark IFC attributes.
const ATTRIBUTES_PROPERTY_SET: &str = "Attributes";

/// Dictionaries whose URI contains this marker are the IFC schema itself and
/// are never emitted as an external classification.
const IFC_DICTIONARY_MARKER: &str = "https://identifier.buildingsmart.org/uri/buildingsmart/ifc";

/// Baseline building-element entities covered by the per-run presence check.
pub const BASIC_IFC_ENTITIES: &[&str] = &[
    "IfcAirTerminal",
    "IfcAirTerminalBox",
    "IfcAirToAirHeatRecovery",
    "IfcAlarm",
    "IfcBeam",
    "IfcBoiler",
    "IfcBuildingElementProxy",
    "IfcCableCarrierFitting",
    "IfcCableCarrierSegment",
    "IfcCableFitting",
    "IfcCableSegment",
    "IfcChimney",
    "IfcColumn",
    // Upstream bSDD spelling, kept verbatim
    "IfcComnunicationsAppliance",
    "IfcCovering",
    "IfcCurtainWall",
    "IfcDiscreteAccessory",
    "IfcDistributionChamberElement",
    "IfcDoor",
    "IfcElectricAppliance",
    "IfcElementAssembly",
    "IfcEnergyConversionDevice",
    "IfcFireSuppressionTerminal",
    "IfcFlowSegment",
    "IfcFlowStorageDevice",
    "IfcFlowTerminal",
    "IfcFooting",
    "IfcFurniture",
    "IfcGeographicElement",
    "IfcMechanicalFastener",
    "IfcMember",
    "IfcOutlet",
    "IfcPile",
    "IfcPipeFitting",
    "IfcPipeSegment",
    "IfcPlate",
    "IfcRailing",
    "IfcRamp",
    "IfcRampFlight",
    "IfcReinforcingElement",
    "IfcRoof",
    "IfcSanitaryTerminal",
    "IfcSensor",
    "IfcShadingDevice",
    "IfcSign",
    "IfcSignal",
    "IfcSlab",
    "IfcSolarDevice",
    "IfcSpaceHeater",
    "IfcStair",
    "IfcStairFlight",
    "IfcSwitchingDevice",
    "IfcTransportElement",
    "IfcVirtualElement",
    "IfcWall",
    "IfcWindow",
];

/// Translate a whole dictionary into an IDS document.
pub fn translate_dictionary(source: &mut dyn ClassSource, dictionary_uri: &str) -> Result<Ids> {
    let listing = source
        .classes(dictionary_uri)
        .ok_or_else(|| anyhow!("No classes returned for dictionary {}", dictionary_uri))?;

    info!(
        dictionary = %listing.name,
        classes = listing.classes.len(),
        "translating dictionary"
    );

    let mut ids = Ids {
        title: listing.name.clone(),
        copyright: listing.organization_name_owner.clone(),
        version: listing.version.clone(),
        description: Some(format!("IDS for bSDD dictionary {}", listing.name)),
        date: listing.last_updated_utc.as_deref().map(date_part),
        specifications: Vec::new(),
    };

    // Cross-cutting coverage check, once per run
    ids.specifications
        .push(presence_specification(&listing.name, dictionary_uri));

    for class in &listing.classes {
        match class_specification(source, &listing.name, class) {
            Some(specification) => ids.specifications.push(specification),
            None => debug!(uri = %class.uri, "skipping class without detail"),
        }
    }

    Ok(ids)
}

/// The date part of a `lastUpdatedUtc` timestamp.
fn date_part(timestamp: &str) -> String {
    timestamp
        .split('T')
        .next()
        .unwrap_or(timestamp)
        .to_string()
}

/// The per-run presence specification: every baseline entity must carry a
/// classification from the source dictionary (membership only, no value).
fn presence_specification(dictionary_name: &str, dictionary_uri: &str) -> Specification {
    let mut entities: Vec<String> = BASIC_IFC_ENTITIES
        .iter()
        .map(|entity| entity.to_uppercase())
        .collect();
    entities.sort();

    Specification {
        name: format!("Presence of {}", dictionary_name),
        ifc_version: IFC_VERSION.to_string(),
        description: Some(format!(
            "Ensures that all applicable objects in the model have a classification \
             from the '{}' bSDD dictionary: {}",
            dictionary_name, dictionary_uri
        )),
        applicability: vec![Facet::Entity {
            name: FacetValue::Enumeration(entities),
            predefined_type: None,
        }],
        requirements: vec![Facet::Classification {
            value: None,
            system: Some(FacetValue::Simple(dictionary_name.to_string())),
            uri: None,
        }],
    }
}

/// Build one specification for a class, or `None` when its detail fetch
/// fails (non-fatal, the class is skipped).
fn class_specification(
    source: &mut dyn ClassSource,
    dictionary_name: &str,
    class: &ClassListing,
) -> Option<Specification> {
    let details = source.class_detail(&class.uri)?;

    let mut requirements = Vec::new();
    if let Some(entity) = entity_facet(&details.related_ifc_entity_names) {
        requirements.push(entity);
    }
    requirements.extend(classification_facets(source, &details.class_relations));
    requirements.extend(property_facets(&details.class_properties));

    Some(Specification {
        name: details.name.clone(),
        ifc_version: IFC_VERSION.to_string(),
        description: Some(format!(
            "Verifies that each object classified as '{}' meets the requirements \
             from the bSDD class: {}",
            details.name, class.uri
        )),
        applicability: vec![Facet::Classification {
            value: Some(FacetValue::Simple(details.code.clone())),
            system: Some(FacetValue::Simple(dictionary_name.to_string())),
            uri: Some(class.uri.clone()),
        }],
        requirements,
    })
}

/// Entity facet from the class's combined related-entity codes.
fn entity_facet(related_entity_names: &[String]) -> Option<Facet> {
    let (entities, suffixes) = split_entity_code_list(related_entity_names);
    let name = FacetValue::from_values(entities)?;
    Some(Facet::Entity {
        name,
        predefined_type: FacetValue::from_values(suffixes),
    })
}

/// Classification facets from the class's relations, grouped by the related
/// class's owning dictionary. Unresolvable relation targets are dropped and
/// the IFC dictionary itself is never emitted.
fn classification_facets(source: &mut dyn ClassSource, relations: &[ClassRelation]) -> Vec<Facet> {
    let mut codes_by_dictionary: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut uris_by_dictionary: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for relation in relations {
        if !INCLUDED_RELATION_TYPES.contains(&relation.relation_type.as_str()) {
            continue;
        }
        let Some(class_uri) = relation.related_class_uri.as_deref() else {
            continue;
        };
        let Some(related) = source.class_detail(class_uri) else {
            continue;
        };

        let dictionary_uri = related.dictionary_uri.clone().unwrap_or_default();
        codes_by_dictionary
            .entry(dictionary_uri.clone())
            .or_default()
            .insert(related.code.clone());
        uris_by_dictionary
            .entry(dictionary_uri)
            .or_default()
            .insert(class_uri.to_string());
    }

    let mut facets = Vec::new();
    for (dictionary_uri, codes) in codes_by_dictionary {
        if dictionary_uri.contains(IFC_DICTIONARY_MARKER) {
            continue;
        }
        let Some(dictionary) = source.dictionary(&dictionary_uri) else {
            continue;
        };
        if dictionary.name.is_empty() {
            continue;
        }
        let Some(value) = FacetValue::from_values(codes) else {
            continue;
        };
        let uris = &uris_by_dictionary[&dictionary_uri];
        let uri = if uris.len() == 1 {
            uris.iter().next().cloned()
        } else {
            None
        };
        facets.push(Facet::Classification {
            value: Some(value),
            system: Some(FacetValue::Simple(dictionary.name)),
            uri,
        });
    }
    facets
}

/// Property and attribute facets from the class's properties.
fn property_facets(properties: &[ClassProperty]) -> Vec<Facet> {
    let mut facets = Vec::new();
    for property in properties {
        if property.property_set.as_deref() == Some(ATTRIBUTES_PROPERTY_SET) {
            if let Some(facet) = attribute_facet(property) {
                facets.push(facet);
            }
        } else if let Some(facet) = property_facet(property) {
            facets.push(facet);
        }
    }
    facets
}

/// An attribute facet, only when a fixed predefined value is present.
fn attribute_facet(property: &ClassProperty) -> Option<Facet> {
    let code = property.property_code.clone()?;
    let value = property
        .predefined_value
        .clone()
        .filter(|value| !value.is_empty())?;
    Some(Facet::Attribute {
        name: FacetValue::Simple(code),
        value: Some(FacetValue::Simple(value)),
    })
}

/// A property facet; enumerated allowed values take precedence over a fixed
/// predefined value.
fn property_facet(property: &ClassProperty) -> Option<Facet> {
    let property_set = property.property_set.clone()?;
    let code = property.property_code.clone()?;

    let value = if !property.allowed_values.is_empty() {
        FacetValue::from_values(
            property
                .allowed_values
                .iter()
                .map(|allowed| allowed.value.clone()),
        )
    } else {
        property
            .predefined_value
            .clone()
            .filter(|value| !value.is_empty())
            .map(FacetValue::Simple)
    };

    let data_type = map_forward(
        property.data_type.as_deref().unwrap_or_default(),
        property.property_uri.as_deref(),
    )
    .to_uppercase();

    Some(Facet::Property {
        property_set: FacetValue::Simple(property_set),
        base_name: FacetValue::Simple(code),
        value,
        data_type: Some(data_type),
        uri: property.property_uri.clone(),
        cardinality: None,
        instructions: None,
    })
}
