//! Data type mapping between the bSDD vocabulary and IFC measure types.
//!
//! Both directions are total: unrecognized inputs fall back to a documented
//! default instead of failing, so a partially modeled dictionary still
//! converts end to end.

/// Per-property overrides for bSDD properties whose declared data type is too
/// coarse for a useful IDS requirement (lengths, counts, transmittance).
fn property_override(property_uri: &str) -> Option<&'static str> {
    const PREFIX: &str = "https://identifier.buildingsmart.org/uri/buildingsmart/ifc/4.3/prop/";
    let name = property_uri.strip_prefix(PREFIX)?;
    match name {
        "AcousticRating" => Some("IfcLabel"),
        "CapacityPeople" => Some("IfcCountMeasure"),
        "ClearDepth" => Some("IfcPositiveLengthMeasure"),
        "ClearHeight" => Some("IfcPositiveLengthMeasure"),
        "ClearWidth" => Some("IfcPositiveLengthMeasure"),
        "ExposureClass" => Some("IfcLabel"),
        "FireRating" => Some("IfcLabel"),
        "Height" => Some("IfcPositiveLengthMeasure"),
        "ModelReference" => Some("IfcLabel"),
        "SecurityRating" => Some("IfcLabel"),
        "StrengthClass" => Some("IfcLabel"),
        "StructuralClass" => Some("IfcLabel"),
        "SurfaceSpreadOfFlame" => Some("IfcLabel"),
        "ThermalTransmittance" => Some("IfcThermalTransmittanceMeasure"),
        "TileLength" => Some("IfcPositiveLengthMeasure"),
        "TileWidth" => Some("IfcPositiveLengthMeasure"),
        _ => None,
    }
}

/// Map a bSDD declared data type to an IFC type for an IDS property facet.
///
/// A per-URI override wins over the declared type; unknown declared types map
/// to the generic `IFCLABEL`. Callers upper-case the result for emission.
pub fn map_forward(declared_type: &str, property_uri: Option<&str>) -> &'static str {
    if let Some(mapped) = property_uri.and_then(property_override) {
        return mapped;
    }
    match declared_type {
        "String" => "IfcLabel",
        "Boolean" => "IfcBoolean",
        "Integer" => "IfcInteger",
        "Real" => "IfcReal",
        "Character" => "IfcLabel",
        "Time" => "IfcDateTime",
        _ => "IFCLABEL",
    }
}

/// Map an IDS property data type back to a bSDD declared data type.
///
/// Unknown inputs map to `String`.
pub fn map_reverse(ids_type: &str) -> &'static str {
    match ids_type {
        "IFCLABEL" => "String",
        "IFCINTEGER" => "Integer",
        "IFCBOOLEAN" => "Boolean",
        "IFCREAL" => "Real",
        "IFCIDENTIFIER" => "String",
        "IFCURIREFERENCE" => "String",
        "IFCTEXT" => "String",
        "IFCTIME" => "Time",
        "IFCDATE" => "Date",
        "IFCDATETIME" => "Date",
        "IFCDURATION" => "String",
        "IFCTIMESTAMP" => "Time",
        _ => "String",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_declared_types() {
        assert_eq!(map_forward("String", None), "IfcLabel");
        assert_eq!(map_forward("Boolean", None), "IfcBoolean");
        assert_eq!(map_forward("Time", None), "IfcDateTime");
        assert_eq!(map_forward("Blob", None), "IFCLABEL");
    }

    #[test]
    fn test_forward_override_wins() {
        let uri = "https://identifier.buildingsmart.org/uri/buildingsmart/ifc/4.3/prop/Height";
        assert_eq!(map_forward("Real", Some(uri)), "IfcPositiveLengthMeasure");
        // A non-buildingSMART URI does not trigger the override table
        assert_eq!(map_forward("Real", Some("https://example.org/prop/Height")), "IfcReal");
    }

    #[test]
    fn test_reverse_defaults_to_string() {
        assert_eq!(map_reverse("IFCLAMP"), "String");
        assert_eq!(map_reverse(""), "String");
    }

    #[test]
    fn test_round_trip_stays_in_equivalence_class() {
        // Every declared type that maps forward must come back to a bSDD type
        // serving the same value space.
        for (declared, expected) in [
            ("String", "String"),
            ("Boolean", "Boolean"),
            ("Integer", "Integer"),
            ("Real", "Real"),
            ("Character", "String"),
            ("Time", "Date"),
        ] {
            let forward = map_forward(declared, None).to_uppercase();
            assert_eq!(map_reverse(&forward), expected, "declared {declared}");
        }
    }
}
