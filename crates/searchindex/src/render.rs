use crate::error::{Error, Result};
use crate::model::SearchIndex;

/// Write the table back as a `search-index.js` artifact.
///
/// One assignment per crate in registration order, compact JSON, then the
/// single `initSearch` call.
pub fn render(index: &SearchIndex) -> Result<String> {
    let mut out = String::from("var searchIndex = {};\n");
    for (name, krate) in index.crates() {
        let table = serde_json::to_string(krate).map_err(Error::Serialize)?;
        out.push_str(&format!(
            "searchIndex['{}'] = {};\n",
            escape_single_quoted(name),
            table
        ));
    }
    out.push_str("initSearch(searchIndex);\n");
    Ok(out)
}

/// The bare table as pretty-printed JSON.
pub fn to_json_pretty(index: &SearchIndex) -> Result<String> {
    serde_json::to_string_pretty(index).map_err(Error::Serialize)
}

/// Escape for a single-quoted JS string: quotes, backslashes, and every
/// character that would end the line.
fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FIXTURE, fixture};
    use crate::{CrateIndex, SearchIndexBuilder, parse};

    #[test]
    fn render_then_parse_is_identity() {
        let index = fixture();
        let rendered = render(&index).unwrap();
        assert_eq!(parse(&rendered).unwrap(), index);
    }

    #[test]
    fn render_reproduces_fixture_bytes() {
        assert_eq!(render(&fixture()).unwrap(), FIXTURE);
    }

    #[test]
    fn render_matches_fixture_shape() {
        let rendered = render(&fixture()).unwrap();
        let expected_lines: Vec<&str> = FIXTURE.lines().collect();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), expected_lines.len());
        assert_eq!(lines[0], expected_lines[0]);
        assert_eq!(lines[2], expected_lines[2]);
        assert!(lines[1].starts_with("searchIndex['electron_phonon_scattering_2d'] = {\"items\":[[5,\"create_ensemble\""));
    }

    #[test]
    fn empty_index() {
        let index = SearchIndexBuilder::new().build().unwrap();
        insta::assert_snapshot!(render(&index).unwrap(), @r"
        var searchIndex = {};
        initSearch(searchIndex);
        ");
    }

    #[test]
    fn crate_names_are_escaped() {
        let mut builder = SearchIndexBuilder::new();
        builder.register("it's", CrateIndex::default()).unwrap();
        let index = builder.build().unwrap();
        let rendered = render(&index).unwrap();
        assert!(rendered.contains(r"searchIndex['it\'s'] = "));
        assert_eq!(parse(&rendered).unwrap(), index);
    }

    #[test]
    fn line_breaking_crate_names_round_trip() {
        let mut builder = SearchIndexBuilder::new();
        for name in ["a\nb", "c\r\td", "e\u{2028}f\u{2029}", "caf\u{e9}\\", "nul\0"] {
            builder.register(name, CrateIndex::default()).unwrap();
        }
        let index = builder.build().unwrap();
        let rendered = render(&index).unwrap();
        insta::assert_snapshot!(rendered, @r#"
        var searchIndex = {};
        searchIndex['a\nb'] = {"items":[],"paths":[]};
        searchIndex['c\r\td'] = {"items":[],"paths":[]};
        searchIndex['e\u2028f\u2029'] = {"items":[],"paths":[]};
        searchIndex['café\\'] = {"items":[],"paths":[]};
        searchIndex['nul\u0000'] = {"items":[],"paths":[]};
        initSearch(searchIndex);
        "#);
        assert_eq!(parse(&rendered).unwrap(), index);
    }

    #[test]
    fn pretty_json_round_trips() {
        let index = fixture();
        let json = to_json_pretty(&index).unwrap();
        let back: crate::SearchIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
