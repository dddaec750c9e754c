//! Conversion between property values and typed RDF literals
//!
//! | PropertyValue | Literal                |
//! |---------------|------------------------|
//! | `String`      | simple literal         |
//! | `Boolean`     | `xsd:boolean`          |
//! | `Byte`        | `xsd:byte`             |
//! | `Short`       | `xsd:short`            |
//! | `Int`         | `xsd:int`              |
//! | `Long`        | `xsd:long`             |
//! | `Float`       | `xsd:float`            |
//! | `Double`      | `xsd:double`           |
//!
//! Every other property kind has no literal form; properties holding one are
//! left out of the RDF view.

use crate::graph::PropertyValue;
use oxrdf::vocab::xsd;
use oxrdf::{Literal, LiteralRef};
use std::str::FromStr;

/// Convert a property value to a literal, `None` for unsupported kinds
pub fn to_literal(value: &PropertyValue) -> Option<Literal> {
    let literal = match value {
        PropertyValue::String(s) => Literal::new_simple_literal(s.as_str()),
        PropertyValue::Boolean(b) => Literal::from(*b),
        PropertyValue::Byte(b) => Literal::new_typed_literal(b.to_string(), xsd::BYTE),
        PropertyValue::Short(s) => Literal::new_typed_literal(s.to_string(), xsd::SHORT),
        PropertyValue::Int(i) => Literal::new_typed_literal(i.to_string(), xsd::INT),
        PropertyValue::Long(l) => Literal::new_typed_literal(l.to_string(), xsd::LONG),
        PropertyValue::Float(f) => {
            Literal::new_typed_literal(float_lexical(f64::from(*f), f.to_string()), xsd::FLOAT)
        }
        PropertyValue::Double(d) => Literal::new_typed_literal(float_lexical(*d, d.to_string()), xsd::DOUBLE),
        PropertyValue::DateTime(_)
        | PropertyValue::Array(_)
        | PropertyValue::Map(_)
        | PropertyValue::Null => return None,
    };
    Some(literal)
}

/// Convert a literal back to a property value
///
/// Language-tagged and `xsd:string` literals decode to strings. A recognized
/// datatype whose lexical form does not parse, or any other datatype, gives
/// `None`. Decoding is lossy: the tag and non-canonical lexical forms are not
/// kept, so `to_literal(from_literal(l))` only gives back `l` when `l` is in
/// the form `to_literal` writes.
pub fn from_literal(literal: LiteralRef<'_>) -> Option<PropertyValue> {
    let value = literal.value();
    if literal.language().is_some() {
        return Some(PropertyValue::String(value.to_string()));
    }

    let datatype = literal.datatype();
    if datatype == xsd::STRING {
        Some(PropertyValue::String(value.to_string()))
    } else if datatype == xsd::BOOLEAN {
        parse_boolean(value).map(PropertyValue::Boolean)
    } else if datatype == xsd::BYTE {
        parse_integer::<i8>(value).map(PropertyValue::Byte)
    } else if datatype == xsd::SHORT {
        parse_integer::<i16>(value).map(PropertyValue::Short)
    } else if datatype == xsd::INT {
        parse_integer::<i32>(value).map(PropertyValue::Int)
    } else if datatype == xsd::LONG {
        parse_integer::<i64>(value).map(PropertyValue::Long)
    } else if datatype == xsd::FLOAT {
        parse_float::<f32>(value).map(PropertyValue::Float)
    } else if datatype == xsd::DOUBLE {
        parse_float::<f64>(value).map(PropertyValue::Double)
    } else {
        None
    }
}

/// `INF`/`-INF` in place of Rust's `inf`/`-inf`
fn float_lexical(value: f64, display: String) -> String {
    if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        display
    }
}

fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_integer<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

/// XSD spells the special values `INF`, `-INF` and `NaN`
fn parse_float<T: FromStr>(value: &str) -> Option<T> {
    let value = value.trim();
    let normalized = match value {
        "INF" | "+INF" => "inf",
        "-INF" => "-inf",
        "NaN" => "NaN",
        // Rust accepts spellings XSD does not
        v if v.eq_ignore_ascii_case("inf")
            || v.eq_ignore_ascii_case("+inf")
            || v.eq_ignore_ascii_case("-inf")
            || v.eq_ignore_ascii_case("infinity")
            || v.eq_ignore_ascii_case("+infinity")
            || v.eq_ignore_ascii_case("-infinity")
            || v.eq_ignore_ascii_case("nan") =>
        {
            return None
        }
        v => v,
    };
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;
    use std::collections::HashMap;

    fn round_trip(value: PropertyValue) {
        let literal = to_literal(&value).unwrap();
        assert_eq!(from_literal(literal.as_ref()), Some(value));
    }

    #[test]
    fn test_round_trip_scalars() {
        round_trip(PropertyValue::String("marko".to_string()));
        round_trip(PropertyValue::String(String::new()));
        round_trip(PropertyValue::Boolean(true));
        round_trip(PropertyValue::Boolean(false));
        round_trip(PropertyValue::Byte(-128));
        round_trip(PropertyValue::Short(i16::MAX));
        round_trip(PropertyValue::Int(29));
        round_trip(PropertyValue::Long(i64::MIN));
        round_trip(PropertyValue::Float(0.5));
        round_trip(PropertyValue::Float(3.4e38));
        round_trip(PropertyValue::Double(std::f64::consts::PI));
        round_trip(PropertyValue::Double(-1.0e-300));
        round_trip(PropertyValue::Float(f32::INFINITY));
        round_trip(PropertyValue::Double(f64::NEG_INFINITY));
    }

    #[test]
    fn test_lexical_forms() {
        assert_eq!(to_literal(&PropertyValue::Int(29)).unwrap().value(), "29");
        assert_eq!(to_literal(&PropertyValue::Float(f32::INFINITY)).unwrap().value(), "INF");
        assert_eq!(to_literal(&PropertyValue::Double(f64::NEG_INFINITY)).unwrap().value(), "-INF");
        assert_eq!(to_literal(&PropertyValue::Double(0.5)).unwrap().value(), "0.5");
    }

    #[test]
    fn test_nan_round_trip() {
        let literal = to_literal(&PropertyValue::Double(f64::NAN)).unwrap();
        assert_eq!(literal.value(), "NaN");
        match from_literal(literal.as_ref()) {
            Some(PropertyValue::Double(d)) => assert!(d.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_datatypes() {
        let cases = [
            (PropertyValue::String("x".to_string()), xsd::STRING),
            (PropertyValue::Boolean(true), xsd::BOOLEAN),
            (PropertyValue::Byte(1), xsd::BYTE),
            (PropertyValue::Short(1), xsd::SHORT),
            (PropertyValue::Int(1), xsd::INT),
            (PropertyValue::Long(1), xsd::LONG),
            (PropertyValue::Float(1.0), xsd::FLOAT),
            (PropertyValue::Double(1.0), xsd::DOUBLE),
        ];
        for (value, datatype) in cases {
            assert_eq!(to_literal(&value).unwrap().datatype(), datatype, "{:?}", value);
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(to_literal(&PropertyValue::Null), None);
        assert_eq!(to_literal(&PropertyValue::DateTime(1_700_000_000_000)), None);
        assert_eq!(to_literal(&PropertyValue::Array(vec![PropertyValue::Int(1)])), None);
        assert_eq!(to_literal(&PropertyValue::Map(HashMap::new())), None);
    }

    #[test]
    fn test_language_tagged_is_string() {
        let literal = Literal::new_language_tagged_literal("hallo", "de").unwrap();
        let value = from_literal(literal.as_ref()).unwrap();
        assert_eq!(value, PropertyValue::String("hallo".to_string()));

        // the tag does not survive re-encoding
        assert_ne!(to_literal(&value), Some(literal));
    }

    #[test]
    fn test_non_canonical_forms_do_not_re_encode() {
        let padded = Literal::new_typed_literal("029", xsd::INT);
        let value = from_literal(padded.as_ref()).unwrap();
        assert_eq!(to_literal(&value), Some(Literal::new_typed_literal("29", xsd::INT)));
    }

    #[test]
    fn test_lexical_variants() {
        let lit = |v: &str, dt| Literal::new_typed_literal(v, dt);

        assert_eq!(from_literal(lit("1", xsd::BOOLEAN).as_ref()), Some(PropertyValue::Boolean(true)));
        assert_eq!(from_literal(lit("0", xsd::BOOLEAN).as_ref()), Some(PropertyValue::Boolean(false)));
        assert_eq!(from_literal(lit("+42", xsd::INT).as_ref()), Some(PropertyValue::Int(42)));
        assert_eq!(from_literal(lit("007", xsd::LONG).as_ref()), Some(PropertyValue::Long(7)));
        assert_eq!(from_literal(lit("-INF", xsd::FLOAT).as_ref()), Some(PropertyValue::Float(f32::NEG_INFINITY)));
        assert_eq!(from_literal(lit("1e3", xsd::DOUBLE).as_ref()), Some(PropertyValue::Double(1000.0)));
    }

    #[test]
    fn test_malformed_and_unknown() {
        let lit = |v: &str, dt| Literal::new_typed_literal(v, dt);

        assert_eq!(from_literal(lit("yes", xsd::BOOLEAN).as_ref()), None);
        assert_eq!(from_literal(lit("128", xsd::BYTE).as_ref()), None);
        assert_eq!(from_literal(lit("1.5", xsd::INT).as_ref()), None);
        assert_eq!(from_literal(lit("infinity", xsd::DOUBLE).as_ref()), None);
        assert_eq!(from_literal(lit("2024-01-01", xsd::DATE).as_ref()), None);

        let custom = Literal::new_typed_literal("x", NamedNode::new("http://example.org/dt").unwrap());
        assert_eq!(from_literal(custom.as_ref()), None);
    }
}
