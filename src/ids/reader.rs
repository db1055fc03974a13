//! IDS XML reader.
//!
//! Parses an IDS document into the tagged facet model in one pass at the
//! boundary. Unknown elements are skipped, missing optional content becomes
//! `None`, and only structurally broken XML is an error.

use super::types::{Facet, FacetValue, Ids, Specification};
use crate::error::IdsParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse an IDS document from a string.
pub fn parse_str(xml: &str) -> Result<Ids, IdsParseError> {
    let root = parse_tree(xml)?;
    let info = root
        .child("info")
        .ok_or(IdsParseError::MissingElement("info"))?;

    let mut specifications = Vec::new();
    if let Some(container) = root.child("specifications") {
        for element in container.children_named("specification") {
            specifications.push(decode_specification(element)?);
        }
    }

    Ok(Ids {
        title: info.child_text("title").unwrap_or_default(),
        copyright: info.child_text("copyright"),
        version: info.child_text("version"),
        description: info.child_text("description"),
        date: info.child_text("date"),
        specifications,
    })
}

// ---------------------------------------------------------------------------
// Generic element tree
// ---------------------------------------------------------------------------

/// A decoded XML element; names and attribute keys are namespace-stripped.
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<String> {
        let text = self.child(name)?.text.trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn parse_tree(xml: &str) -> Result<Element, IdsParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                let element = stack.pop().ok_or(IdsParseError::UnexpectedClose(name))?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or(IdsParseError::MissingElement("ids"))
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, IdsParseError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Model decoding
// ---------------------------------------------------------------------------

fn decode_specification(element: &Element) -> Result<Specification, IdsParseError> {
    let name = element
        .attribute("name")
        .ok_or(IdsParseError::MissingSpecificationName)?
        .to_string();

    Ok(Specification {
        name,
        ifc_version: element.attribute("ifcVersion").unwrap_or_default().to_string(),
        description: element.attribute("description").map(str::to_string),
        applicability: decode_facets(element.child("applicability")),
        requirements: decode_facets(element.child("requirements")),
    })
}

fn decode_facets(container: Option<&Element>) -> Vec<Facet> {
    let Some(container) = container else {
        return Vec::new();
    };
    container
        .children
        .iter()
        .filter_map(decode_facet)
        .collect()
}

/// Decode one facet element; unknown or incomplete facets are dropped.
fn decode_facet(element: &Element) -> Option<Facet> {
    match element.name.as_str() {
        "entity" => Some(Facet::Entity {
            name: element.child("name").and_then(decode_value)?,
            predefined_type: element.child("predefinedType").and_then(decode_value),
        }),
        "classification" => Some(Facet::Classification {
            value: element.child("value").and_then(decode_value),
            system: element.child("system").and_then(decode_value),
            uri: element.attribute("uri").map(str::to_string),
        }),
        "property" => Some(Facet::Property {
            property_set: element.child("propertySet").and_then(decode_value)?,
            base_name: element.child("baseName").and_then(decode_value)?,
            value: element.child("value").and_then(decode_value),
            data_type: element.attribute("dataType").map(str::to_string),
            uri: element.attribute("uri").map(str::to_string),
            cardinality: element.attribute("cardinality").map(str::to_string),
            instructions: element.attribute("instructions").map(str::to_string),
        }),
        "attribute" => Some(Facet::Attribute {
            name: element.child("name").and_then(decode_value)?,
            value: element.child("value").and_then(decode_value),
        }),
        _ => None,
    }
}

/// Decode the value carrier of a facet slot: `<simpleValue>` or an
/// `<xs:restriction>` with enumerations or patterns.
fn decode_value(element: &Element) -> Option<FacetValue> {
    if let Some(simple) = element.child("simpleValue") {
        return Some(FacetValue::Simple(simple.text.trim().to_string()));
    }

    let restriction = element.child("restriction")?;
    let enumerations: Vec<String> = restriction
        .children_named("enumeration")
        .filter_map(|e| e.attribute("value").map(str::to_string))
        .collect();
    if !enumerations.is_empty() {
        return Some(FacetValue::Enumeration(enumerations));
    }

    let patterns: Vec<String> = restriction
        .children_named("pattern")
        .filter_map(|e| e.attribute("value").map(str::to_string))
        .collect();
    if !patterns.is_empty() {
        return Some(FacetValue::Pattern(patterns));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ids xmlns="http://standards.buildingsmart.org/IDS" xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <info>
    <title>Basis Bouwproducten</title>
    <date>2024-05-03</date>
  </info>
  <specifications>
    <specification name="Binnenwand" ifcVersion="IFC4X3_ADD2" description="demo">
      <applicability minOccurs="1" maxOccurs="unbounded">
        <classification>
          <value>
            <xs:restriction base="xs:string">
              <xs:pattern value="22.21.*" />
            </xs:restriction>
          </value>
          <system><simpleValue>NL-SfB</simpleValue></system>
        </classification>
      </applicability>
      <requirements>
        <entity>
          <name><simpleValue>IFCWALL</simpleValue></name>
          <predefinedType><simpleValue>SOLIDWALL</simpleValue></predefinedType>
        </entity>
        <property dataType="IFCLABEL" cardinality="required" uri="https://identifier.buildingsmart.org/uri/x/prop/FireRating">
          <propertySet><simpleValue>Pset_WallCommon</simpleValue></propertySet>
          <baseName><simpleValue>FireRating</simpleValue></baseName>
          <value>
            <xs:restriction base="xs:string">
              <xs:enumeration value="30" />
              <xs:enumeration value="60" />
            </xs:restriction>
          </value>
        </property>
      </requirements>
    </specification>
  </specifications>
</ids>"#;

    #[test]
    fn test_parse_info_and_specification() {
        let ids = parse_str(SAMPLE).unwrap();
        assert_eq!(ids.title, "Basis Bouwproducten");
        assert_eq!(ids.date.as_deref(), Some("2024-05-03"));
        assert_eq!(ids.specifications.len(), 1);

        let spec = &ids.specifications[0];
        assert_eq!(spec.name, "Binnenwand");
        assert_eq!(spec.ifc_version, "IFC4X3_ADD2");
        assert_eq!(spec.description.as_deref(), Some("demo"));
        assert_eq!(spec.applicability.len(), 1);
        assert_eq!(spec.requirements.len(), 2);
    }

    #[test]
    fn test_pattern_and_enumeration_values_decode() {
        let ids = parse_str(SAMPLE).unwrap();
        let spec = &ids.specifications[0];

        let Facet::Classification { value, system, .. } = &spec.applicability[0] else {
            panic!("expected classification facet");
        };
        assert_eq!(
            value.as_ref().and_then(FacetValue::patterns),
            Some(&["22.21.*".to_string()][..])
        );
        assert_eq!(system.as_ref().and_then(|s| s.simple()), Some("NL-SfB"));

        let Facet::Property {
            value, cardinality, ..
        } = &spec.requirements[1]
        else {
            panic!("expected property facet");
        };
        assert_eq!(
            value.as_ref().and_then(FacetValue::enumeration),
            Some(&["30".to_string(), "60".to_string()][..])
        );
        assert_eq!(cardinality.as_deref(), Some("required"));
    }

    #[test]
    fn test_missing_info_is_an_error() {
        let result = parse_str("<ids><specifications/></ids>");
        assert!(matches!(result, Err(IdsParseError::MissingElement("info"))));
    }

    #[test]
    fn test_unknown_facets_are_skipped() {
        let xml = r#"<ids><info><title>t</title></info><specifications>
            <specification name="s">
              <applicability><somethingElse/></applicability>
              <requirements/>
            </specification></specifications></ids>"#;
        let ids = parse_str(xml).unwrap();
        assert!(ids.specifications[0].applicability.is_empty());
    }
}
