//! Markdown summary written next to the charts.

use std::fmt::Write;

use crate::aggregate::ChartSeries;

/// One markdown table per chart, ranked the way the chart is drawn.
pub fn render_markdown(sections: &[(&str, &ChartSeries)], generated: jiff::Timestamp) -> String {
    let mut md = String::new();
    writeln!(md, "# Encryption Benchmarks").unwrap();
    writeln!(md).unwrap();
    writeln!(
        md,
        "> Auto-generated by `lockbench`. Do not edit manually."
    )
    .unwrap();
    writeln!(md, "> Last updated: {}", generated.strftime("%Y-%m-%dT%H:%M:%SZ")).unwrap();
    writeln!(md).unwrap();
    writeln!(
        md,
        "Times are the median of all runs via [hyperfine](https://github.com/sharkdp/hyperfine)."
    )
    .unwrap();

    for (title, series) in sections {
        writeln!(md).unwrap();
        writeln!(md, "### {title}").unwrap();
        writeln!(md).unwrap();
        writeln!(md, "| Rank | Tool | Value | vs best |").unwrap();
        writeln!(md, "|-----:|------|------:|--------:|").unwrap();

        let best = series.values.first().copied().unwrap_or(0.0);
        for (rank, (identity, value)) in series.identities.iter().zip(&series.values).enumerate() {
            let ratio = if best > 0.0 {
                format!("{:.2}x", value / best)
            } else {
                "-".to_string()
            };
            let value = series.format.value(*value);
            if rank == 0 {
                writeln!(md, "| {} | **{identity}** | **{value}** | {ratio} |", rank + 1).unwrap();
            } else {
                writeln!(md, "| {} | {identity} | {value} | {ratio} |", rank + 1).unwrap();
            }
        }
    }

    md
}
