use anyhow::Result;

use crate::catalog::{Catalog, SourceStatus};

pub fn list_sources(catalog: &Catalog) -> Result<()> {
    print!("{}", render_sources(catalog));
    Ok(())
}

pub fn render_sources(catalog: &Catalog) -> String {
    let mut out = format!(
        "{:<12} {:>9} {:>9}  SOURCE\n",
        "STATUS", "RETAINED", "DISCARDED"
    );

    for report in catalog.reports() {
        let (retained, discarded) = match &report.status {
            SourceStatus::Loaded {
                retained,
                discarded,
                ..
            } => (retained.to_string(), discarded.to_string()),
            _ => ("-".to_string(), "-".to_string()),
        };

        out.push_str(&format!(
            "{:<12} {:>9} {:>9}  {}\n",
            report.status.label(),
            retained,
            discarded,
            report.path.display()
        ));

        match &report.status {
            SourceStatus::Malformed { message } | SourceStatus::Unreadable { message } => {
                out.push_str(&format!("{:<12} {}\n", "", message));
            }
            _ => {}
        }
    }

    out.push_str(&format!(
        "\n{} products loaded from {} source(s)\n",
        catalog.len(),
        catalog.reports().len()
    ));
    out
}
