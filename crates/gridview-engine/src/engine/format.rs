/// Kind of an evaluated cell value. Only numbers are formatted specially.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Error,
    Other(String),
}

impl ValueKind {
    pub fn from_name(name: &str) -> ValueKind {
        match name {
            "number" | "numeric" => ValueKind::Number,
            "string" | "text" => ValueKind::String,
            "boolean" | "boolean_true" | "boolean_false" => ValueKind::Boolean,
            "error" => ValueKind::Error,
            other => ValueKind::Other(other.to_string()),
        }
    }
}

/// An evaluated cell value: its kind and literal text.
#[derive(Clone, Debug, PartialEq)]
pub struct CellValue {
    pub kind: ValueKind,
    pub literal: String,
}

impl CellValue {
    pub fn new(kind: ValueKind, literal: impl Into<String>) -> CellValue {
        CellValue {
            kind,
            literal: literal.into(),
        }
    }

    pub fn number(literal: impl Into<String>) -> CellValue {
        CellValue::new(ValueKind::Number, literal)
    }

    pub fn string(literal: impl Into<String>) -> CellValue {
        CellValue::new(ValueKind::String, literal)
    }
}

/// Format a value for display: numbers are rounded to the nearest integer,
/// everything else shows its literal. A numeric literal that does not parse
/// is shown as written.
pub fn format_value(value: &CellValue) -> String {
    match value.kind {
        ValueKind::Number => match value.literal.trim().parse::<f64>() {
            Ok(n) => format_rounded(n),
            Err(_) => value.literal.clone(),
        },
        _ => value.literal.clone(),
    }
}

/// Round a number half away from zero and print it without decimals.
pub fn format_rounded(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else {
        let rounded = n.round();
        if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{:.0}", rounded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_rounded() {
        assert_eq!(format_value(&CellValue::number("1.4")), "1");
        assert_eq!(format_value(&CellValue::number("2.5")), "3");
        assert_eq!(format_value(&CellValue::number("-2.5")), "-3");
        assert_eq!(format_value(&CellValue::number("-0.2")), "0");
        assert_eq!(format_value(&CellValue::number("1e3")), "1000");
    }

    #[test]
    fn test_other_kinds_are_verbatim() {
        assert_eq!(format_value(&CellValue::string("2.5")), "2.5");
        let err = CellValue::new(ValueKind::from_name("error"), "#DIV/0!");
        assert_eq!(format_value(&err), "#DIV/0!");
        let t = CellValue::new(ValueKind::from_name("boolean_true"), "TRUE");
        assert_eq!(format_value(&t), "TRUE");
    }

    #[test]
    fn test_unparseable_number_is_shown_as_written() {
        assert_eq!(format_value(&CellValue::number("n/a")), "n/a");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_rounded(f64::NAN), "#NAN!");
        assert_eq!(format_rounded(f64::INFINITY), "#INF!");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ValueKind::from_name("number"), ValueKind::Number);
        assert_eq!(ValueKind::from_name("blank"), ValueKind::Other("blank".into()));
    }
}
