//! Views CLI subcommand: print the standard metric view catalog.
//!
//! The table form is for humans; `--json` emits the serialized
//! `ViewDescriptor` list that dashboards are built against.

use crate::registry::{MetricRegistry, ViewDescriptor};

/// Print the standard view catalog. Returns the process exit code.
pub fn run_views(json: bool) -> i32 {
    let registry = match MetricRegistry::standard() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to build metric registry: {}", e);
            return 2;
        }
    };
    let descriptors = registry.descriptors();

    if json {
        match serde_json::to_string_pretty(&descriptors) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Failed to encode views: {}", e);
                return 1;
            }
        }
    } else {
        for line in render_table(&descriptors) {
            println!("{}", line);
        }
    }
    0
}

/// One line per view: name, aggregation, unit, bounds and tag keys.
pub fn render_table(views: &[ViewDescriptor]) -> Vec<String> {
    let width = views.iter().map(|v| v.name.len()).max().unwrap_or(0);
    views
        .iter()
        .map(|v| {
            let mut line = format!(
                "{:<width$}  {:<12}  {:<3}",
                v.name,
                v.aggregation,
                v.unit.as_str(),
                width = width
            );
            if !v.bounds.is_empty() {
                let bounds: Vec<String> = v.bounds.iter().map(|b| b.to_string()).collect();
                line.push_str(&format!("  bounds=[{}]", bounds.join(",")));
            }
            if !v.tag_keys.is_empty() {
                line.push_str(&format!("  tags=[{}]", v.tag_keys.join(",")));
            }
            line.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_one_line_per_view() {
        let registry = MetricRegistry::standard().unwrap();
        let lines = render_table(&registry.descriptors());
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("bitswap_messages_received_total"));
        assert!(lines[1].ends_with("tags=[bitswap_topic]"));
        let duration = lines
            .iter()
            .find(|l| l.starts_with("retrieval_deal_duration_seconds"))
            .unwrap();
        assert!(duration.contains("bounds=[0,10,20,30,40,50,60,120,240,480,540,600]"));
    }
}
