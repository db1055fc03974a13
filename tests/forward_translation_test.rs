//! Forward translation tests against an in-memory dictionary source.

use bsdd_ids::bsdd::types::{
    AllowedValue, ClassDetails, ClassListing, ClassProperty, ClassRelation, Dictionary,
    DictionaryClasses,
};
use bsdd_ids::bsdd::ClassSource;
use bsdd_ids::forward::{translate_dictionary, BASIC_IFC_ENTITIES, IFC_VERSION};
use bsdd_ids::ids::{Facet, FacetValue};
use std::collections::HashMap;

const DICT_URI: &str = "https://identifier.buildingsmart.org/uri/demo/demo/latest";

#[derive(Default)]
struct FakeSource {
    dictionaries: HashMap<String, Dictionary>,
    listings: HashMap<String, DictionaryClasses>,
    details: HashMap<String, ClassDetails>,
}

impl ClassSource for FakeSource {
    fn dictionary(&mut self, uri: &str) -> Option<Dictionary> {
        self.dictionaries.get(uri).cloned()
    }

    fn classes(&mut self, dictionary_uri: &str) -> Option<DictionaryClasses> {
        self.listings.get(dictionary_uri).cloned()
    }

    fn class_detail(&mut self, class_uri: &str) -> Option<ClassDetails> {
        self.details.get(class_uri).cloned()
    }
}

fn listing(classes: Vec<ClassListing>) -> DictionaryClasses {
    DictionaryClasses {
        name: "Demo Dictionary".to_string(),
        version: Some("1.2".to_string()),
        organization_name_owner: Some("Demo Org".to_string()),
        last_updated_utc: Some("2024-05-03T10:11:12Z".to_string()),
        classes_total_count: classes.len(),
        classes,
    }
}

fn class_entry(uri: &str, name: &str, code: &str) -> ClassListing {
    ClassListing {
        uri: uri.to_string(),
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn details(uri: &str, name: &str, code: &str) -> ClassDetails {
    ClassDetails {
        uri: uri.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        dictionary_uri: Some(DICT_URI.to_string()),
        related_ifc_entity_names: Vec::new(),
        class_properties: Vec::new(),
        class_relations: Vec::new(),
    }
}

fn relation(relation_type: &str, target: &str) -> ClassRelation {
    ClassRelation {
        relation_type: relation_type.to_string(),
        related_class_uri: Some(target.to_string()),
    }
}

#[test]
fn end_to_end_class_with_entity_and_property() {
    let class_uri = "https://identifier.buildingsmart.org/uri/demo/demo/latest/class/Wall";
    let mut detail = details(class_uri, "Wall", "Wall");
    detail.related_ifc_entity_names = vec!["IfcWallSTANDARD".to_string()];
    detail.class_properties = vec![ClassProperty {
        property_set: Some("Dimensions".to_string()),
        property_code: Some("Height".to_string()),
        property_uri: Some(
            "https://identifier.buildingsmart.org/uri/buildingsmart/ifc/4.3/prop/Height"
                .to_string(),
        ),
        data_type: Some("Real".to_string()),
        predefined_value: None,
        allowed_values: Vec::new(),
    }];

    let mut source = FakeSource::default();
    source.listings.insert(
        DICT_URI.to_string(),
        listing(vec![class_entry(class_uri, "Wall", "Wall")]),
    );
    source.details.insert(class_uri.to_string(), detail);

    let ids = translate_dictionary(&mut source, DICT_URI).unwrap();

    // Presence spec plus the class spec
    assert_eq!(ids.specifications.len(), 2);
    assert_eq!(ids.title, "Demo Dictionary");
    assert_eq!(ids.copyright.as_deref(), Some("Demo Org"));
    assert_eq!(ids.date.as_deref(), Some("2024-05-03"));

    let spec = &ids.specifications[1];
    assert_eq!(spec.name, "Wall");
    assert_eq!(spec.ifc_version, IFC_VERSION);

    let Facet::Classification { value, system, uri } = &spec.applicability[0] else {
        panic!("expected classification applicability");
    };
    assert_eq!(value.as_ref().and_then(|v| v.simple()), Some("Wall"));
    assert_eq!(
        system.as_ref().and_then(|s| s.simple()),
        Some("Demo Dictionary")
    );
    assert_eq!(uri.as_deref(), Some(class_uri));

    assert_eq!(spec.requirements.len(), 2);
    let Facet::Entity {
        name,
        predefined_type,
    } = &spec.requirements[0]
    else {
        panic!("expected entity facet");
    };
    assert_eq!(name.simple(), Some("IFCWALL"));
    assert_eq!(
        predefined_type.as_ref().and_then(|p| p.simple()),
        Some("STANDARD")
    );

    let Facet::Property {
        property_set,
        base_name,
        value,
        data_type,
        uri,
        ..
    } = &spec.requirements[1]
    else {
        panic!("expected property facet");
    };
    assert_eq!(property_set.simple(), Some("Dimensions"));
    assert_eq!(base_name.simple(), Some("Height"));
    assert!(value.is_none());
    assert_eq!(data_type.as_deref(), Some("IFCPOSITIVELENGTHMEASURE"));
    assert!(uri.as_deref().unwrap().ends_with("/Height"));
}

#[test]
fn relations_group_by_dictionary_sorted_and_ifc_excluded() {
    let class_uri = "https://example.org/demo/class/Thing";
    let dict_a = "https://identifier.buildingsmart.org/uri/a/a/1";
    let dict_b = "https://identifier.buildingsmart.org/uri/b/b/1";
    let ifc_dict = "https://identifier.buildingsmart.org/uri/buildingsmart/ifc/4.3";

    let mut detail = details(class_uri, "Thing", "Thing");
    detail.class_relations = vec![
        relation("IsChildOf", "https://x/a-b"),
        relation("IsChildOf", "https://x/a-a"),
        relation("HasMaterial", "https://x/b-z"),
        relation("IsChildOf", "https://x/ifc-wall"),
        // Not in the allow-list: ignored entirely
        relation("IsSimilarTo", "https://x/a-ignored"),
        // Unresolvable target: dropped
        relation("IsChildOf", "https://x/missing"),
    ];

    let mut source = FakeSource::default();
    source.listings.insert(
        DICT_URI.to_string(),
        listing(vec![class_entry(class_uri, "Thing", "Thing")]),
    );
    source.details.insert(class_uri.to_string(), detail);

    for (uri, dict, code) in [
        ("https://x/a-b", dict_a, "b"),
        ("https://x/a-a", dict_a, "a"),
        ("https://x/b-z", dict_b, "z"),
        ("https://x/ifc-wall", ifc_dict, "IfcWall"),
        ("https://x/a-ignored", dict_a, "ignored"),
    ] {
        let mut target = details(uri, code, code);
        target.dictionary_uri = Some(dict.to_string());
        source.details.insert(uri.to_string(), target);
    }
    for (uri, name) in [
        (dict_a, "System A"),
        (dict_b, "System B"),
        (ifc_dict, "IFC"),
    ] {
        source.dictionaries.insert(
            uri.to_string(),
            Dictionary {
                uri: uri.to_string(),
                name: name.to_string(),
                version: None,
                organization_code_owner: None,
            },
        );
    }

    let ids = translate_dictionary(&mut source, DICT_URI).unwrap();
    let spec = &ids.specifications[1];

    let classifications: Vec<_> = spec
        .requirements
        .iter()
        .filter_map(|facet| match facet {
            Facet::Classification { value, system, uri } => Some((value, system, uri)),
            _ => None,
        })
        .collect();

    assert_eq!(classifications.len(), 2, "IFC group must be excluded");

    let (value_a, system_a, uri_a) = &classifications[0];
    assert_eq!(system_a.as_ref().and_then(|s| s.simple()), Some("System A"));
    assert_eq!(
        value_a.as_ref().and_then(|v| v.enumeration()),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert!(uri_a.is_none(), "two targets means no single URI");

    let (value_b, system_b, uri_b) = &classifications[1];
    assert_eq!(system_b.as_ref().and_then(|s| s.simple()), Some("System B"));
    assert_eq!(value_b.as_ref().and_then(|v| v.simple()), Some("z"));
    assert_eq!(uri_b.as_deref(), Some("https://x/b-z"));
}

#[test]
fn failed_class_detail_skips_only_that_class() {
    let good_uri = "https://x/class/good";
    let bad_uri = "https://x/class/bad";

    let mut source = FakeSource::default();
    source.listings.insert(
        DICT_URI.to_string(),
        listing(vec![
            class_entry(bad_uri, "Bad", "Bad"),
            class_entry(good_uri, "Good", "Good"),
        ]),
    );
    // Only the good class resolves
    source
        .details
        .insert(good_uri.to_string(), details(good_uri, "Good", "Good"));

    let ids = translate_dictionary(&mut source, DICT_URI).unwrap();
    let names: Vec<_> = ids
        .specifications
        .iter()
        .map(|spec| spec.name.as_str())
        .collect();
    assert_eq!(names, vec!["Presence of Demo Dictionary", "Good"]);
}

#[test]
fn missing_listing_is_an_error() {
    let mut source = FakeSource::default();
    assert!(translate_dictionary(&mut source, DICT_URI).is_err());
}

#[test]
fn presence_specification_covers_baseline_entities() {
    let mut source = FakeSource::default();
    source
        .listings
        .insert(DICT_URI.to_string(), listing(Vec::new()));

    let ids = translate_dictionary(&mut source, DICT_URI).unwrap();
    assert_eq!(ids.specifications.len(), 1);

    let presence = &ids.specifications[0];
    let Facet::Entity { name, .. } = &presence.applicability[0] else {
        panic!("expected entity applicability");
    };
    let entities = name.enumeration().expect("enumerated entities");
    assert_eq!(entities.len(), BASIC_IFC_ENTITIES.len());
    assert!(entities.contains(&"IFCWALL".to_string()));
    assert!(entities.contains(&"IFCWINDOW".to_string()));
}

#[test]
fn attribute_and_enumerated_property_facets() {
    let class_uri = "https://x/class/door";
    let mut detail = details(class_uri, "Door", "Door");
    detail.class_properties = vec![
        // Attribute with a fixed value
        ClassProperty {
            property_set: Some("Attributes".to_string()),
            property_code: Some("OperationType".to_string()),
            property_uri: None,
            data_type: None,
            predefined_value: Some("SWINGING".to_string()),
            allowed_values: Vec::new(),
        },
        // Attribute without a value: silently skipped
        ClassProperty {
            property_set: Some("Attributes".to_string()),
            property_code: Some("Name".to_string()),
            property_uri: None,
            data_type: None,
            predefined_value: None,
            allowed_values: Vec::new(),
        },
        // Property with duplicate allowed values collapsing to a scalar
        ClassProperty {
            property_set: Some("Pset_DoorCommon".to_string()),
            property_code: Some("FireRating".to_string()),
            property_uri: None,
            data_type: Some("String".to_string()),
            predefined_value: None,
            allowed_values: vec![
                AllowedValue {
                    value: "30".to_string(),
                    code: None,
                    sort_number: Some(0),
                },
                AllowedValue {
                    value: "30".to_string(),
                    code: None,
                    sort_number: Some(1),
                },
            ],
        },
    ];

    let mut source = FakeSource::default();
    source.listings.insert(
        DICT_URI.to_string(),
        listing(vec![class_entry(class_uri, "Door", "Door")]),
    );
    source.details.insert(class_uri.to_string(), detail);

    let ids = translate_dictionary(&mut source, DICT_URI).unwrap();
    let spec = &ids.specifications[1];
    assert_eq!(spec.requirements.len(), 2);

    let Facet::Attribute { name, value } = &spec.requirements[0] else {
        panic!("expected attribute facet");
    };
    assert_eq!(name.simple(), Some("OperationType"));
    assert_eq!(value.as_ref().and_then(|v| v.simple()), Some("SWINGING"));

    let Facet::Property { value, .. } = &spec.requirements[1] else {
        panic!("expected property facet");
    };
    // Duplicates collapse before the single/multi decision
    assert_eq!(
        *value,
        Some(FacetValue::Simple("30".to_string())),
        "never a singleton enumeration"
    );
}
