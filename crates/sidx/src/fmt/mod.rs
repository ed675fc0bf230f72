//! Terminal rendering of resolved items, reports and statistics.

mod colorizer;
mod markdown;
mod output;
mod tokens;

use searchindex::{IndexStats, ItemKind, Report, ResolvedItem, Severity, Signature};

use colorizer::Colorizer;
use markdown::format_summary;
use output::Output;

const RULE_WIDTH: usize = 80;

const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize",
];

/// Keyword column for list output, padded like the kind names rustdoc shows.
fn kind_label(kind: ItemKind) -> String {
    format!("{:<12}", kind.as_str())
}

/// Push a lowercased signature type name with the matching token kind.
fn push_type(out: &mut Output, name: &str) {
    if PRIMITIVES.contains(&name) {
        out.primitive(name);
    } else if name.len() == 1 {
        out.generic(name);
    } else {
        out.type_(name);
    }
}

/// `kind path::to::Item`, with the last segment styled by kind.
pub(crate) fn item_line(item: &ResolvedItem<'_>) -> Output {
    let mut out = Output::new();
    out.kind(kind_label(item.kind)).whitespace();

    let segments = item.segments();
    let (parents, last) = segments.split_at(segments.len().saturating_sub(1));
    let last = last.first().copied().unwrap_or(item.name);
    for seg in parents {
        out.identifier(*seg).symbol("::");
    }
    match item.kind {
        ItemKind::Function | ItemKind::Method | ItemKind::TyMethod => out.function(last),
        kind if kind.is_type_like() || kind == ItemKind::AssociatedType => out.type_(last),
        _ => out.identifier(last),
    };
    out
}

/// `fn name(a, b) -> c`
pub(crate) fn signature_line(name: &str, signature: &Signature) -> Output {
    let mut out = Output::new();
    out.keyword("fn").whitespace().function(name).symbol("(");
    for (i, input) in signature.inputs.iter().enumerate() {
        if i > 0 {
            out.symbol_comma();
        }
        push_type(&mut out, &input.name);
    }
    out.symbol(")");
    if let Some(output) = &signature.output {
        out.symbol_arrow();
        push_type(&mut out, &output.name);
    }
    out
}

pub(crate) fn render_tokens(output: &Output) -> String {
    Colorizer::get().tokens(output.tokens())
}

/// One line per item.
pub(crate) fn format_list(items: &[ResolvedItem<'_>]) -> String {
    let mut output = String::new();
    for item in items {
        output.push_str(&render_tokens(&item_line(item)));
        output.push('\n');
    }
    output
}

/// Several candidates: list them and suggest a fully qualified lookup.
pub(crate) fn format_ambiguous(items: &[ResolvedItem<'_>]) -> String {
    let colorizer = Colorizer::get();
    let rule = colorizer.dimmed(&"─".repeat(RULE_WIDTH));
    let mut output = String::new();
    output.push_str("Multiple items found. Use the fully qualified name to view a specific item:\n");
    output.push_str(&rule);
    output.push('\n');
    for item in items {
        output.push_str("  ");
        output.push_str(&render_tokens(&item_line(item)));
        output.push('\n');
    }
    output.push_str(&rule);
    output.push('\n');
    if let Some(first) = items.first() {
        output.push('\n');
        output.push_str(&format!("Example: sidx show {}\n", first.qualified_name()));
    }
    output
}

/// Full view of a single item.
pub(crate) fn format_detail(item: &ResolvedItem<'_>) -> String {
    let colorizer = Colorizer::get();
    let mut output = String::new();

    output.push_str(&render_tokens(&item_line(item)));
    output.push('\n');

    if let Some(owner) = item.owner {
        let mut line = Output::new();
        line.kind(owner.kind.as_str()).whitespace().type_(&owner.name);
        output.push_str(&format!("  owner:     {}\n", render_tokens(&line)));
    }
    if let Some(signature) = item.signature {
        output.push_str(&format!(
            "  signature: {}\n",
            render_tokens(&signature_line(item.name, signature))
        ));
    }

    output.push('\n');
    let summary = item.summary.map(format_summary).unwrap_or_default();
    if summary.is_empty() {
        output.push_str(&colorizer.dimmed("No documentation available."));
    } else {
        output.push_str(&summary);
    }
    output.push('\n');
    output
}

pub(crate) fn format_report(report: &Report) -> String {
    let colorizer = Colorizer::get();
    let mut output = String::new();
    for problem in report.problems() {
        let label = match problem.severity() {
            Severity::Error => colorizer.error("error"),
            Severity::Warning => colorizer.warning("warning"),
        };
        output.push_str(&format!("{}: {}\n", label, problem));
    }
    output
}

pub(crate) fn format_stats(stats: &IndexStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("crates:         {}\n", stats.crates));
    output.push_str(&format!("items:          {}\n", stats.items));
    output.push_str(&format!("paths:          {}\n", stats.paths));
    output.push_str(&format!(
        "documented:     {} ({:.1}%)\n",
        stats.documented,
        stats.documented_ratio() * 100.0
    ));
    output.push_str(&format!("with signature: {}\n", stats.with_signature));

    if !stats.per_kind.is_empty() {
        output.push_str("\nby kind:\n");
        for (kind, count) in &stats.per_kind {
            output.push_str(&format!("  {:<20}{:>5}\n", kind.as_str(), count));
        }
    }

    if stats.per_crate.len() > 1 {
        output.push_str("\nby crate:\n");
        for (name, crate_stats) in &stats.per_crate {
            output.push_str(&format!(
                "  {:<32}{:>5} items{:>5} documented\n",
                name, crate_stats.items, crate_stats.documented
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::tokens::{Token, tokens_to_string};
    use super::*;
    use searchindex::{PathEntry, resolve};

    #[test]
    fn signature_tokens() {
        let signature = Signature::new(["brillouinzone", "f64", "t"], Some("vec"));
        let out = signature_line("pmax", &signature);
        assert_eq!(
            tokens_to_string(out.tokens()),
            "fn pmax(brillouinzone, f64, t) -> vec"
        );
        assert!(out.tokens().contains(&Token::Primitive("f64".to_string())));
        assert!(out.tokens().contains(&Token::Generic("t".to_string())));
        assert!(out.tokens().contains(&Token::Type("vec".to_string())));
    }

    #[test]
    fn item_line_styles_last_segment() {
        let krate = searchindex::CrateIndex {
            items: vec![searchindex::IndexItem {
                kind: ItemKind::StructField,
                name: "tau".to_string(),
                path: "sim::stats".to_string(),
                summary: None,
                owner: Some(0),
                signature: None,
            }],
            paths: vec![PathEntry::new(ItemKind::Struct, "Stats")],
        };
        let items = resolve("sim", &krate);
        let out = item_line(&items[0]);
        assert_eq!(
            tokens_to_string(out.tokens()),
            "structfield  sim::stats::Stats::tau"
        );
        assert_eq!(out.tokens().last(), Some(&Token::Identifier("tau".to_string())));
    }
}
