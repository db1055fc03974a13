//! IDS XML serialization.
//!
//! The document is assembled as a string against the IDS 1.0 schema. The
//! 0.9.7 compatibility target differs only in the schemaLocation token and
//! the IFC version tag, so it is produced by exact token replacement on the
//! rendered 1.0 document.

use super::types::{Facet, FacetValue, Ids, Specification};
use anyhow::Result;
use std::fmt::Write;
use std::path::Path;

pub const SCHEMA_LOCATION_1_0: &str =
    "http://standards.buildingsmart.org/IDS http://standards.buildingsmart.org/IDS/1.0/ids.xsd";
pub const SCHEMA_LOCATION_0_9_7: &str =
    "http://standards.buildingsmart.org/IDS http://standards.buildingsmart.org/IDS/0.9.7/ids.xsd";

/// Target document version of the serialized IDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdsVersion {
    #[default]
    V1_0,
    V0_9_7,
}

/// Render a document to XML (without the XML declaration).
pub fn render(ids: &Ids, version: IdsVersion) -> Result<String> {
    let rendered = render_1_0(ids)?;
    Ok(match version {
        IdsVersion::V1_0 => rendered,
        IdsVersion::V0_9_7 => convert_to_0_9_7(&rendered),
    })
}

/// Downgrade a rendered 1.0 document to the 0.9.7 compatibility target.
pub fn convert_to_0_9_7(ids_xml: &str) -> String {
    ids_xml
        .replace(SCHEMA_LOCATION_1_0, SCHEMA_LOCATION_0_9_7)
        .replace("IFC4X3_ADD2", "IFC4X3")
}

/// Render a document and write it to `path` with the XML declaration.
pub fn write_file(ids: &Ids, version: IdsVersion, path: &Path) -> Result<()> {
    let body = render(ids, version)?;
    std::fs::write(path, format!("<?xml version='1.0' encoding='utf-8'?>\n{}\n", body))?;
    Ok(())
}

fn render_1_0(ids: &Ids) -> Result<String> {
    let mut xml = String::new();

    writeln!(
        xml,
        r#"<ids xmlns="http://standards.buildingsmart.org/IDS" xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="{}">"#,
        SCHEMA_LOCATION_1_0
    )?;

    // ── Info block ──
    writeln!(xml, "  <info>")?;
    writeln!(xml, "    <title>{}</title>", xml_escape(&ids.title))?;
    if let Some(copyright) = &ids.copyright {
        writeln!(xml, "    <copyright>{}</copyright>", xml_escape(copyright))?;
    }
    if let Some(version) = &ids.version {
        writeln!(xml, "    <version>{}</version>", xml_escape(version))?;
    }
    if let Some(description) = &ids.description {
        writeln!(
            xml,
            "    <description>{}</description>",
            xml_escape(description)
        )?;
    }
    if let Some(date) = &ids.date {
        writeln!(xml, "    <date>{}</date>", xml_escape(date))?;
    }
    writeln!(xml, "  </info>")?;

    // ── Specifications ──
    writeln!(xml, "  <specifications>")?;
    for specification in &ids.specifications {
        write_specification(&mut xml, specification)?;
    }
    writeln!(xml, "  </specifications>")?;
    write!(xml, "</ids>")?;

    Ok(xml)
}

fn write_specification(xml: &mut String, specification: &Specification) -> Result<()> {
    let description_attr = specification
        .description
        .as_deref()
        .map(|d| format!(r#" description="{}""#, xml_escape(d)))
        .unwrap_or_default();
    writeln!(
        xml,
        r#"    <specification name="{}" ifcVersion="{}"{}>"#,
        xml_escape(&specification.name),
        xml_escape(&specification.ifc_version),
        description_attr
    )?;

    writeln!(xml, r#"      <applicability minOccurs="1" maxOccurs="unbounded">"#)?;
    for facet in &specification.applicability {
        write_facet(xml, facet, false)?;
    }
    writeln!(xml, "      </applicability>")?;

    writeln!(xml, "      <requirements>")?;
    for facet in &specification.requirements {
        write_facet(xml, facet, true)?;
    }
    writeln!(xml, "      </requirements>")?;

    writeln!(xml, "    </specification>")?;
    Ok(())
}

fn write_facet(xml: &mut String, facet: &Facet, requirement: bool) -> Result<()> {
    match facet {
        Facet::Entity {
            name,
            predefined_type,
        } => {
            writeln!(xml, "        <entity>")?;
            write_value(xml, "name", name)?;
            if let Some(predefined_type) = predefined_type {
                write_value(xml, "predefinedType", predefined_type)?;
            }
            writeln!(xml, "        </entity>")?;
        }
        Facet::Classification { value, system, uri } => {
            let mut attrs = String::new();
            if requirement {
                attrs.push_str(r#" cardinality="required""#);
            }
            if let Some(uri) = uri {
                write!(attrs, r#" uri="{}""#, xml_escape(uri))?;
            }
            writeln!(xml, "        <classification{}>", attrs)?;
            if let Some(value) = value {
                write_value(xml, "value", value)?;
            }
            if let Some(system) = system {
                write_value(xml, "system", system)?;
            }
            writeln!(xml, "        </classification>")?;
        }
        Facet::Property {
            property_set,
            base_name,
            value,
            data_type,
            uri,
            cardinality,
            instructions,
        } => {
            let mut attrs = String::new();
            if let Some(data_type) = data_type {
                write!(attrs, r#" dataType="{}""#, xml_escape(data_type))?;
            }
            match cardinality.as_deref() {
                Some(cardinality) => write!(attrs, r#" cardinality="{}""#, xml_escape(cardinality))?,
                None if requirement => attrs.push_str(r#" cardinality="required""#),
                None => {}
            }
            if let Some(uri) = uri {
                write!(attrs, r#" uri="{}""#, xml_escape(uri))?;
            }
            if let Some(instructions) = instructions {
                write!(attrs, r#" instructions="{}""#, xml_escape(instructions))?;
            }
            writeln!(xml, "        <property{}>", attrs)?;
            write_value(xml, "propertySet", property_set)?;
            write_value(xml, "baseName", base_name)?;
            if let Some(value) = value {
                write_value(xml, "value", value)?;
            }
            writeln!(xml, "        </property>")?;
        }
        Facet::Attribute { name, value } => {
            let cardinality_attr = if requirement {
                r#" cardinality="required""#
            } else {
                ""
            };
            writeln!(xml, "        <attribute{}>", cardinality_attr)?;
            write_value(xml, "name", name)?;
            if let Some(value) = value {
                write_value(xml, "value", value)?;
            }
            writeln!(xml, "        </attribute>")?;
        }
    }
    Ok(())
}

fn write_value(xml: &mut String, tag: &str, value: &FacetValue) -> Result<()> {
    match value {
        FacetValue::Simple(literal) => {
            writeln!(
                xml,
                "          <{tag}><simpleValue>{}</simpleValue></{tag}>",
                xml_escape(literal)
            )?;
        }
        FacetValue::Enumeration(values) => {
            writeln!(xml, "          <{tag}>")?;
            writeln!(xml, r#"            <xs:restriction base="xs:string">"#)?;
            for value in values {
                writeln!(
                    xml,
                    r#"              <xs:enumeration value="{}" />"#,
                    xml_escape(value)
                )?;
            }
            writeln!(xml, "            </xs:restriction>")?;
            writeln!(xml, "          </{tag}>")?;
        }
        FacetValue::Pattern(patterns) => {
            writeln!(xml, "          <{tag}>")?;
            writeln!(xml, r#"            <xs:restriction base="xs:string">"#)?;
            for pattern in patterns {
                writeln!(
                    xml,
                    r#"              <xs:pattern value="{}" />"#,
                    xml_escape(pattern)
                )?;
            }
            writeln!(xml, "            </xs:restriction>")?;
            writeln!(xml, "          </{tag}>")?;
        }
    }
    Ok(())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
