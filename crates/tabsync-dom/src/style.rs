//! Inline `style` attribute handling

/// Parse an inline style declaration list into ordered `(property, value)` pairs.
///
/// Property names are lower-cased; empty declarations are dropped.
pub fn parse_style(source: &str) -> Vec<(String, String)> {
    source
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            if prop.is_empty() || value.is_empty() {
                return None;
            }
            Some((prop, value.to_string()))
        })
        .collect()
}

/// Render declarations back into an inline style string.
pub fn format_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(prop, value)| format!("{prop}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_keeps_order() {
        let decls = parse_style("display: none; HEIGHT:40px");
        assert_eq!(
            decls,
            vec![
                ("display".to_string(), "none".to_string()),
                ("height".to_string(), "40px".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_style_drops_empty_declarations() {
        assert!(parse_style(";;  ; color:").is_empty());
    }

    #[test]
    fn test_format_style() {
        let decls = vec![("height".to_string(), "20px".to_string())];
        assert_eq!(format_style(&decls), "height: 20px;");
        assert_eq!(format_style(&[]), "");
    }
}
